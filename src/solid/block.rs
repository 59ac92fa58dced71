use hedron::{Face, Mesh, Vertex};
use nalgebra::{Point3, Vector3};

use super::{check_extent, fragment, GeometryError, TexRepeat};

/// Parameters of `d3d_model_block`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockParams {
    pub from: Point3<f64>,
    pub to: Point3<f64>,
    pub repeat: TexRepeat,
}

impl Default for BlockParams {
    /// A unit cube centred on the origin.
    fn default() -> Self {
        Self {
            from: Point3::new(-0.5, -0.5, -0.5),
            to: Point3::new(0.5, 0.5, 0.5),
            repeat: TexRepeat::default(),
        }
    }
}

/// Faces of a block, by corner index.
///
/// # Diagram
/// `XYZ>A`, where `XYZ` says which corner (`from` = 0, `to` = 1) is taken on each axis, and `A`
/// is the resulting vertex index.
/// <pre>
/// Bottom (z = 0)  Top (z = 1)
/// -------------   -------------     Y
/// |010>2|110>3|   |011>6|111>7|     |
/// |-----|-----|   |-----|-----|     ___ X
/// |000>0|100>1|   |001>4|101>5|
/// -------------   -------------
/// </pre>
#[rustfmt::skip]
const BLOCK_FACES: [[u32; 4]; 6] = [
    [0, 2, 3, 1], // -z
    [4, 5, 7, 6], // +z
    [0, 1, 5, 4], // -y
    [2, 6, 7, 3], // +y
    [0, 4, 6, 2], // -x
    [1, 3, 7, 5], // +x
];

/// Generate a box between two corners: always 8 vertices and 6 quads.
///
/// Vertices are shared between faces, so texture coordinates are per corner: the four side faces
/// each span the full `horizontal × vertical` repeat, while the top and bottom faces only get a
/// strip of it.
pub fn block(params: &BlockParams) -> Result<Mesh, GeometryError> {
    let d: Vector3<f64> = params.to - params.from;
    check_extent("block width", d.x)?;
    check_extent("block depth", d.y)?;
    check_extent("block height", d.z)?;
    let TexRepeat {
        horizontal: h,
        vertical: v,
    } = params.repeat;

    let vertices = (0..8u8)
        .map(|i| {
            let (x, y, z) = (i & 1, (i >> 1) & 1, (i >> 2) & 1);
            let corner = Vector3::new(x as f64, y as f64, z as f64);
            Vertex::new(params.from + d.component_mul(&corner))
                .with_uv(h * (x ^ y) as f64, v * (1 - z) as f64)
        })
        .collect();
    let faces = BLOCK_FACES.iter().copied().map(Face::quad).collect();
    fragment(vertices, faces)
}
