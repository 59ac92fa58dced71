use std::io;

use d3d::{
    error::Truncation,
    primitive::FillType,
    record::RecordKind,
    solid::{self, GridParams, TexRepeat},
    Error, ImportConfig, Mesh, MeshSink, Warning,
};
use nalgebra::Point3;
use quickcheck_macros::quickcheck;

const MERGED: ImportConfig = ImportConfig {
    merge_primitives: true,
    triangulate: false,
};

const SEPARATE: ImportConfig = ImportConfig {
    merge_primitives: false,
    triangulate: false,
};

fn document(records: &[&str]) -> String {
    let mut text = format!("100\n{}\n", records.len());
    for r in records {
        text.push_str(r);
        text.push('\n');
    }
    text
}

/// Keeps what it's given, but fails after `limit` meshes.
struct Limited {
    meshes: Vec<Mesh>,
    limit: usize,
}

impl MeshSink for Limited {
    type Error = io::Error;

    fn submit(&mut self, mesh: Mesh) -> Result<(), Self::Error> {
        if self.meshes.len() == self.limit {
            return Err(io::Error::new(io::ErrorKind::Other, "sink is full"));
        }
        self.meshes.push(mesh);
        Ok(())
    }
}

#[derive(Default)]
struct TrianglesOnly(Vec<Mesh>);

impl MeshSink for TrianglesOnly {
    type Error = std::convert::Infallible;

    fn submit(&mut self, mesh: Mesh) -> Result<(), Self::Error> {
        self.0.push(mesh);
        Ok(())
    }

    fn accepts_loose_geometry(&self) -> bool {
        false
    }
}

#[test]
fn default_config_merges() {
    assert_eq!(ImportConfig::default(), MERGED);
    let meshes = d3d::decode_str(&document(&["10", "11"]), ImportConfig::default()).unwrap();
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].vertex_count(), 8 + 26);
}

#[test]
fn single_box_merged() {
    let meshes = d3d::decode_str("100\n1\n10\n", MERGED).unwrap();
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].vertex_count(), 8);
    assert_eq!(meshes[0].face_count(), 6);
}

#[test]
fn triangulated_box_has_twelve_triangles() {
    let config = ImportConfig {
        triangulate: true,
        ..MERGED
    };
    let meshes = d3d::decode_str("100\n1\n10\n", config).unwrap();
    assert_eq!(meshes[0].vertex_count(), 8);
    assert_eq!(meshes[0].face_count(), 12);
    assert!(meshes[0].faces().iter().all(|f| f.is_triangle()));
}

#[test]
fn unmatched_begin_is_truncation() {
    let err = d3d::decode_str("100\n2\n0 0\n2 0 0 0\n", MERGED).unwrap_err();
    assert!(matches!(
        err,
        Error::TruncatedInput(Truncation::UnmatchedBegin { line: 3 })
    ));
}

#[test]
fn missing_records_is_truncation() {
    let err = d3d::decode_str("100\n3\n10\n", MERGED).unwrap_err();
    assert!(matches!(
        err,
        Error::TruncatedInput(Truncation::MissingRecords {
            expected: 3,
            found: 1
        })
    ));
}

#[test]
fn other_versions_are_rejected() {
    let err = d3d::decode_str("99\n0\n", MERGED).unwrap_err();
    assert!(matches!(err, Error::UnsupportedVersion(99)));

    // the record count isn't even looked at
    let err = d3d::decode_str("101\nnonsense\n", MERGED).unwrap_err();
    assert!(matches!(err, Error::UnsupportedVersion(101)));
}

#[test]
fn nested_begin() {
    let err = d3d::decode_str(&document(&["0 4", "0 4", "1"]), MERGED).unwrap_err();
    assert!(matches!(err, Error::NestedPrimitive { line: 4, open: 3 }));
}

#[test]
fn records_outside_primitive() {
    let err = d3d::decode_str(&document(&["2 0 0 0"]), MERGED).unwrap_err();
    assert!(matches!(
        err,
        Error::NoOpenPrimitive {
            line: 3,
            kind: RecordKind::Vertex
        }
    ));

    let err = d3d::decode_str(&document(&["10", "1"]), MERGED).unwrap_err();
    assert!(matches!(
        err,
        Error::NoOpenPrimitive {
            line: 4,
            kind: RecordKind::End
        }
    ));
}

#[test]
fn malformed_records_stop_before_any_geometry() {
    let mut sink: Vec<Mesh> = Vec::new();
    let err = d3d::decode_into(document(&["10", "0 4", "2 0 0"]).as_bytes(), SEPARATE, &mut sink)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { line: 5, .. }));
    assert!(sink.is_empty());
}

#[test]
fn separate_mode_keeps_flushed_prefix_on_failure() {
    let mut sink: Vec<Mesh> = Vec::new();
    let err = d3d::decode_into(document(&["10", "11", "1"]).as_bytes(), SEPARATE, &mut sink)
        .unwrap_err();
    assert!(matches!(err, Error::NoOpenPrimitive { line: 5, .. }));
    assert_eq!(sink.len(), 2);
    assert_eq!(sink[0].vertex_count(), 8);
    assert_eq!(sink[1].vertex_count(), 26);
}

#[test]
fn merged_mode_submits_nothing_on_failure() {
    let mut sink: Vec<Mesh> = Vec::new();
    let err =
        d3d::decode_into(document(&["10", "11", "1"]).as_bytes(), MERGED, &mut sink).unwrap_err();
    assert!(matches!(err, Error::NoOpenPrimitive { .. }));
    assert!(sink.is_empty());
}

#[test]
fn degenerate_solid_reports_its_line() {
    let err = d3d::decode_str(&document(&["10", "10 0 0 0 0 1 1"]), SEPARATE).unwrap_err();
    assert!(matches!(err, Error::InvalidParameters { line: 4, .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn sink_failures_surface() {
    let mut sink = Limited {
        meshes: Vec::new(),
        limit: 1,
    };
    let err = d3d::decode_into(document(&["10", "10"]).as_bytes(), SEPARATE, &mut sink).unwrap_err();
    assert!(matches!(err, Error::Sink(_)));
    assert_eq!(sink.meshes.len(), 1);
}

#[test]
fn one_mesh_per_primitive() {
    let text = document(&[
        "0 4",
        "2 0 0 0",
        "2 1 0 0",
        "2 0 1 0",
        "1",
        "14 0 0 0 1 0 1",
        "15 0 0 0 1 1 0",
    ]);
    let meshes = d3d::decode_str(&text, SEPARATE).unwrap();
    assert_eq!(meshes.len(), 3);
    assert_eq!(meshes[0].face_count(), 1);
    assert_eq!(meshes[1].vertex_count(), 4);
    assert_eq!(meshes[2].vertex_count(), 4);
}

#[test]
fn strips_and_fans_triangulate() {
    let strip = document(&[
        "0 5",
        "2 0 0 0",
        "2 0 1 0",
        "2 1 0 0",
        "2 1 1 0",
        "1",
    ]);
    let meshes = d3d::decode_str(&strip, MERGED).unwrap();
    let faces: Vec<Vec<u32>> = meshes[0].faces().iter().map(|f| f.indices().to_vec()).collect();
    assert_eq!(faces, vec![vec![0, 1, 2], vec![2, 1, 3]]);

    let fan = strip.replacen("0 5", "0 6", 1);
    let meshes = d3d::decode_str(&fan, MERGED).unwrap();
    let faces: Vec<Vec<u32>> = meshes[0].faces().iter().map(|f| f.indices().to_vec()).collect();
    assert_eq!(faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
}

#[test]
fn vertex_attributes_survive() {
    let text = document(&[
        "0",
        "9 0 0 0 0 0 1 0.25 0.75 255 0.5",
        "9 1 0 0 0 0 1 1 0 65280 1",
        "9 0 1 0 0 0 1 0 1 16711680 1",
        "1",
    ]);
    let meshes = d3d::decode_str(&text, MERGED).unwrap();
    let v = meshes[0].vertices()[0];
    assert_eq!(v.normal.unwrap().z, 1.0);
    assert_eq!(v.uv.unwrap().x, 0.25);
    let c = v.color.unwrap();
    assert_eq!((c.x, c.y, c.z, c.w), (1.0, 0.0, 0.0, 0.5));
    assert_eq!(meshes[0].vertices()[2].color.unwrap().z, 1.0);
}

#[test]
fn loose_geometry_is_dropped_for_triangle_sinks() {
    let text = document(&["0 2", "2 0 0 0", "2 1 0 0", "1", "10"]);
    let mut sink = TrianglesOnly::default();
    let report = d3d::decode_into(text.as_bytes(), SEPARATE, &mut sink).unwrap();
    assert_eq!(report.records, 5);
    assert_eq!(report.meshes, 1);
    assert_eq!(
        report.warnings,
        vec![Warning::LooseGeometryDropped {
            line: 3,
            fill: FillType::LineList
        }]
    );

    // a sink that takes everything gets the edge
    let meshes = d3d::decode_str(&text, SEPARATE).unwrap();
    assert_eq!(meshes[0].edges(), &[[0, 1]]);
}

#[test]
fn empty_merged_decode_still_yields_a_mesh() {
    let meshes = d3d::decode_str("100\n0\n", MERGED).unwrap();
    assert_eq!(meshes.len(), 1);
    assert!(meshes[0].is_empty());
    assert!(d3d::decode_str("100\n0\n", SEPARATE).unwrap().is_empty());
}

/// Build a well-formed document from arbitrary choices.
fn script(choices: &[(u8, u8)]) -> String {
    let mut records = Vec::new();
    for (i, &(which, n)) in choices.iter().enumerate() {
        let z = i as f64;
        match which % 5 {
            0 => records.push(format!("10 0 0 {z} 1 2 {} 1 1", z + 1.0)),
            1 => records.push(format!("11 0 0 {z} 2 2 {} 1 1 {} {}", z + 1.0, n % 2, 3 + n % 20)),
            2 => records.push(format!("13 -1 -1 {z} 1 1 {} 1 1 {}", z + 2.0, 3 + n % 20)),
            fill => {
                let count = match fill {
                    3 => 3 * (1 + n as usize % 4),
                    _ => 3 + n as usize % 6,
                };
                records.push(format!("0 {}", if fill == 3 { 4 } else { 5 }));
                for k in 0..count {
                    records.push(format!("2 {k} {} {z}", k % 2));
                }
                records.push("1".to_owned());
            }
        }
    }
    let refs: Vec<&str> = records.iter().map(String::as_str).collect();
    document(&refs)
}

#[quickcheck]
fn merged_indices_stay_in_range(choices: Vec<(u8, u8)>) -> bool {
    let meshes = d3d::decode_str(&script(&choices), MERGED).unwrap();
    let mesh = &meshes[0];
    meshes.len() == 1
        && mesh
            .faces()
            .iter()
            .flat_map(|f| f.indices())
            .all(|&i| (i as usize) < mesh.vertex_count())
}

#[quickcheck]
fn decoding_is_deterministic(choices: Vec<(u8, u8)>, merge: bool) -> bool {
    let config = ImportConfig {
        merge_primitives: merge,
        triangulate: false,
    };
    let text = script(&choices);
    d3d::decode_str(&text, config).unwrap() == d3d::decode_str(&text, config).unwrap()
}

#[quickcheck]
fn cylinder_counts(steps: u8, closed: bool) -> bool {
    let n = 3 + steps as usize % 60;
    let record = format!("11 0 0 0 1 1 1 1 1 {} {n}", closed as u8);
    let text = document(&[record.as_str()]);
    let mesh = &d3d::decode_str(&text, MERGED).unwrap()[0];
    let quads = mesh.faces().iter().filter(|f| f.len() == 4).count();
    let caps = if closed { 2 } else { 0 };
    mesh.vertex_count() == 2 * n + caps && quads == n && mesh.face_count() == n + caps * n
}

#[quickcheck]
fn grid_counts(a: u8, b: u8) -> bool {
    let (a, b) = (1 + a as u32 % 32, 1 + b as u32 % 32);
    let params = GridParams::floor(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        TexRepeat::default(),
    )
    .with_segments(a, b);
    let mesh = solid::grid(&params).unwrap();
    mesh.vertex_count() == ((a + 1) * (b + 1)) as usize && mesh.face_count() == (a * b) as usize
}

#[quickcheck]
fn block_counts(corner: (i8, i8, i8), size: (i8, i8, i8), triangulate: bool) -> bool {
    // any nonzero extent, either direction
    let extent = |s: i8| if s == 0 { 1.0 } else { s as f64 / 8.0 };
    let (x, y, z) = (corner.0 as f64, corner.1 as f64, corner.2 as f64);
    let record = format!(
        "10 {x} {y} {z} {} {} {}",
        x + extent(size.0),
        y + extent(size.1),
        z + extent(size.2)
    );
    let config = ImportConfig {
        triangulate,
        ..MERGED
    };
    let mesh = &d3d::decode_str(&document(&[record.as_str()]), config).unwrap()[0];
    let faces_ok = match triangulate {
        true => mesh.face_count() == 12 && mesh.faces().iter().all(|f| f.is_triangle()),
        false => mesh.face_count() == 6 && mesh.faces().iter().all(|f| f.len() == 4),
    };
    mesh.vertex_count() == 8 && faces_ok
}

#[quickcheck]
fn cone_counts(steps: u8, closed: bool) -> bool {
    let n = 3 + steps as usize % 60;
    let record = format!("12 0 0 0 1 1 1 1 1 {} {n}", closed as u8);
    let mesh = &d3d::decode_str(&document(&[record.as_str()]), MERGED).unwrap()[0];
    let caps = closed as usize;
    mesh.vertex_count() == n + 1 + caps
        && mesh.face_count() == n + caps * n
        && mesh.faces().iter().all(|f| f.is_triangle())
}

#[quickcheck]
fn ellipsoid_counts(steps: u8) -> bool {
    let n = 3 + steps as usize % 40;
    let record = format!("13 -1 -1 -1 1 1 1 1 1 {n}");
    let mesh = &d3d::decode_str(&document(&[record.as_str()]), MERGED).unwrap()[0];
    let triangles = mesh.faces().iter().filter(|f| f.is_triangle()).count();
    let quads = mesh.faces().iter().filter(|f| f.len() == 4).count();
    mesh.vertex_count() == n * (n - 1) + 2 && triangles == 2 * n && quads == n * (n - 2)
}

#[test]
fn flat_cylinders_and_cones_are_rejected() {
    for kind in [11, 12] {
        let record = format!("{kind} 0 0 0 1 1 0 1 1 1 8");
        let err = d3d::decode_str(&document(&[record.as_str()]), MERGED).unwrap_err();
        assert!(
            matches!(err, Error::InvalidParameters { line: 3, .. }),
            "kind {kind}: {err}"
        );
    }
}

#[test]
fn invalid_utf8_reports_its_line() {
    let err = d3d::decode(&b"100\n1\n10 \xff\n"[..], MERGED).unwrap_err();
    assert!(matches!(err, Error::MalformedRecord { line: 3, .. }));
}
