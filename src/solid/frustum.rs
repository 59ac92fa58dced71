use std::f64::consts::TAU;

use hedron::{Face, Mesh, Vertex};
use nalgebra::Point3;

use super::{check_extent, check_segments, fragment, GeometryError, TexRepeat, MAX_SEGMENTS};

/// Parameters of `d3d_model_cylinder` and `d3d_model_cone`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumParams {
    pub from: Point3<f64>,
    pub to: Point3<f64>,
    pub repeat: TexRepeat,
    /// Whether to cap the ends that have a nonzero radius.
    pub closed: bool,
    /// Number of radial segments.
    pub steps: u32,
}

impl Default for FrustumParams {
    fn default() -> Self {
        Self {
            from: Point3::new(-0.5, -0.5, -0.5),
            to: Point3::new(0.5, 0.5, 0.5),
            repeat: TexRepeat::default(),
            closed: true,
            steps: 12,
        }
    }
}

/// A cylinder along z: `2 * steps` ring vertices and `steps` lateral quads, plus two cap centres
/// and `2 * steps` cap triangles when closed.
#[inline]
pub fn cylinder(params: &FrustumParams) -> Result<Mesh, GeometryError> {
    frustum(params, 1.0, 1.0)
}

/// A cone with its base at `from.z` and its apex at `to.z`.
#[inline]
pub fn cone(params: &FrustumParams) -> Result<Mesh, GeometryError> {
    frustum(params, 1.0, 0.0)
}

/// One end of a frustum.
#[derive(Debug, Clone, Copy)]
enum End {
    /// Index of the first of `steps` ring vertices.
    Ring(u32),
    /// Index of the single vertex a zero-radius ring collapses to.
    Apex(u32),
}

/// A tapered cylinder along z whose bottom (`from.z`) and top (`to.z`) radii are the box's
/// half-extents scaled by `bottom` and `top`. A scale of `0` collapses that end to an apex.
///
/// The cross-section is elliptic when the box isn't square.
///
/// Rings have no seam vertex: U runs `0..horizontal * (steps - 1) / steps` around each ring, so
/// the last side face maps the texture back to `0` and shows that strip mirrored.
pub fn frustum(params: &FrustumParams, bottom: f64, top: f64) -> Result<Mesh, GeometryError> {
    let n = check_segments("steps", params.steps, 3, MAX_SEGMENTS)?;
    let rx = check_extent("x diameter", params.to.x - params.from.x)?.abs() / 2.0;
    let ry = check_extent("y diameter", params.to.y - params.from.y)?.abs() / 2.0;
    check_extent("height", params.to.z - params.from.z)?;
    for (what, scale) in [("bottom radius", bottom), ("top radius", top)] {
        if !scale.is_finite() {
            return Err(GeometryError::NonFinite(what));
        }
        if scale < 0.0 {
            return Err(GeometryError::Negative { what, got: scale });
        }
    }
    if bottom == 0.0 && top == 0.0 {
        return Err(GeometryError::ZeroExtent("radius"));
    }

    let (cx, cy) = (
        (params.from.x + params.to.x) / 2.0,
        (params.from.y + params.to.y) / 2.0,
    );
    let TexRepeat {
        horizontal: h,
        vertical: v,
    } = params.repeat;
    let step = TAU / n as f64;

    let mut vertices = Vec::with_capacity(2 * n as usize + 2);
    let ring = |vertices: &mut Vec<Vertex>, scale: f64, z: f64, tex_v: f64| {
        let start = vertices.len() as u32;
        if scale == 0.0 {
            vertices.push(Vertex::at(cx, cy, z).with_uv(h / 2.0, tex_v));
            return End::Apex(start);
        }
        for k in 0..n {
            let (sin, cos) = (k as f64 * step).sin_cos();
            vertices.push(
                Vertex::at(cx + scale * rx * cos, cy + scale * ry * sin, z)
                    .with_uv(h * k as f64 / n as f64, tex_v),
            );
        }
        End::Ring(start)
    };
    let low = ring(&mut vertices, bottom, params.from.z, v);
    let high = ring(&mut vertices, top, params.to.z, 0.0);

    let mut faces = Vec::with_capacity(3 * n as usize);
    for k in 0..n {
        let j = (k + 1) % n;
        faces.push(match (low, high) {
            (End::Ring(b), End::Ring(t)) => Face::quad([b + k, b + j, t + j, t + k]),
            (End::Ring(b), End::Apex(a)) => Face::tri([b + k, b + j, a]),
            (End::Apex(a), End::Ring(t)) => Face::tri([a, t + j, t + k]),
            (End::Apex(_), End::Apex(_)) => unreachable!("both radii zero was rejected above"),
        });
    }

    if params.closed {
        if let End::Ring(b) = low {
            let c = vertices.len() as u32;
            vertices.push(Vertex::at(cx, cy, params.from.z).with_uv(0.5, 0.5));
            faces.extend((0..n).map(|k| Face::tri([c, b + (k + 1) % n, b + k])));
        }
        if let End::Ring(t) = high {
            let c = vertices.len() as u32;
            vertices.push(Vertex::at(cx, cy, params.to.z).with_uv(0.5, 0.5));
            faces.extend((0..n).map(|k| Face::tri([c, t + k, t + (k + 1) % n])));
        }
    }

    fragment(vertices, faces)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn params(closed: bool, steps: u32) -> FrustumParams {
        FrustumParams {
            from: Point3::new(0.0, 0.0, 0.0),
            to: Point3::new(2.0, 4.0, 3.0),
            closed,
            steps,
            ..Default::default()
        }
    }

    #[test]
    fn open_cylinder_counts() {
        let mesh = cylinder(&params(false, 8)).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.face_count(), 8);
        assert!(mesh.faces().iter().all(|f| f.len() == 4));
    }

    #[test]
    fn closed_cylinder_counts() {
        let mesh = cylinder(&params(true, 8)).unwrap();
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.faces().iter().filter(|f| f.len() == 4).count(), 8);
        assert_eq!(mesh.faces().iter().filter(|f| f.is_triangle()).count(), 16);
    }

    #[test]
    fn cylinder_is_elliptic() {
        let mesh = cylinder(&params(false, 4)).unwrap();
        let p = |i: usize| mesh.vertices()[i].position;
        assert_relative_eq!(p(0), Point3::new(2.0, 2.0, 0.0));
        assert_relative_eq!(p(1), Point3::new(1.0, 4.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(p(6), Point3::new(0.0, 2.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn cone_collapses_to_apex() {
        let mesh = cone(&params(false, 6)).unwrap();
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.face_count(), 6);
        assert_relative_eq!(mesh.vertices()[6].position, Point3::new(1.0, 2.0, 3.0));

        let closed = cone(&params(true, 6)).unwrap();
        assert_eq!(closed.vertex_count(), 8);
        assert_eq!(closed.face_count(), 12);
    }

    #[test]
    fn inverted_cone() {
        let mesh = frustum(&params(true, 5), 0.0, 1.0).unwrap();
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.face_count(), 10);
        assert_relative_eq!(mesh.vertices()[0].position, Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(matches!(
            cylinder(&params(true, 0)),
            Err(GeometryError::TooFewSegments { .. })
        ));
        let flat = FrustumParams {
            to: Point3::new(0.0, 4.0, 3.0),
            ..params(true, 8)
        };
        assert_eq!(
            cylinder(&flat),
            Err(GeometryError::ZeroExtent("x diameter"))
        );
        let squat = FrustumParams {
            to: Point3::new(2.0, 4.0, 0.0),
            ..params(true, 8)
        };
        assert_eq!(cylinder(&squat), Err(GeometryError::ZeroExtent("height")));
        assert_eq!(cone(&squat), Err(GeometryError::ZeroExtent("height")));
        assert_eq!(
            frustum(&params(true, 8), 0.0, 0.0),
            Err(GeometryError::ZeroExtent("radius"))
        );
    }

    #[test]
    fn uv_wraps_with_repeat() {
        let p = FrustumParams {
            repeat: TexRepeat {
                horizontal: 2.0,
                vertical: 1.0,
            },
            ..params(false, 4)
        };
        let mesh = cylinder(&p).unwrap();
        let uv = mesh.vertices()[2].uv.unwrap();
        assert_relative_eq!(uv.x, 1.0);
        assert_relative_eq!(uv.y, 1.0);
        assert_relative_eq!(mesh.vertices()[6].uv.unwrap().y, 0.0);
    }
}
