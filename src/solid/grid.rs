use hedron::{Face, Mesh, Vertex};
use nalgebra::{Point3, Vector3};

use super::{check_extent, check_segments, fragment, GeometryError, TexRepeat, MAX_SEGMENTS};

/// A planar parallelogram divided into `x_segments × y_segments` cells.
///
/// Vertex `(i, j)` sits at `origin + u_axis * i / x_segments + v_axis * j / y_segments`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub origin: Point3<f64>,
    pub u_axis: Vector3<f64>,
    pub v_axis: Vector3<f64>,
    pub x_segments: u32,
    pub y_segments: u32,
    pub repeat: TexRepeat,
}

impl GridParams {
    /// `d3d_model_wall`: an upright quad running from `(from.x, from.y)` to `(to.x, to.y)`
    /// horizontally and spanning `from.z..to.z`.
    pub fn wall(from: Point3<f64>, to: Point3<f64>, repeat: TexRepeat) -> Self {
        Self {
            // textures read top-down, so start at the top edge
            origin: Point3::new(from.x, from.y, to.z),
            u_axis: Vector3::new(to.x - from.x, to.y - from.y, 0.0),
            v_axis: Vector3::new(0.0, 0.0, from.z - to.z),
            x_segments: 1,
            y_segments: 1,
            repeat,
        }
    }

    /// `d3d_model_floor`: a quad over `from.x..to.x × from.y..to.y`, rising from `from.z` to
    /// `to.z` along y.
    pub fn floor(from: Point3<f64>, to: Point3<f64>, repeat: TexRepeat) -> Self {
        Self {
            origin: from,
            u_axis: Vector3::new(to.x - from.x, 0.0, 0.0),
            v_axis: Vector3::new(0.0, to.y - from.y, to.z - from.z),
            x_segments: 1,
            y_segments: 1,
            repeat,
        }
    }

    #[inline]
    pub fn with_segments(mut self, x: u32, y: u32) -> Self {
        self.x_segments = x;
        self.y_segments = y;
        self
    }
}

/// Generate a grid: `(x_segments + 1) * (y_segments + 1)` vertices, `x_segments * y_segments`
/// quads, rows ordered along `v_axis`.
pub fn grid(params: &GridParams) -> Result<Mesh, GeometryError> {
    let a = check_segments("x segments", params.x_segments, 1, MAX_SEGMENTS)?;
    let b = check_segments("y segments", params.y_segments, 1, MAX_SEGMENTS)?;
    check_extent("grid area", params.u_axis.cross(&params.v_axis).norm_squared())?;
    let TexRepeat {
        horizontal: h,
        vertical: v,
    } = params.repeat;

    let mut vertices = Vec::with_capacity(((a + 1) * (b + 1)) as usize);
    for j in 0..=b {
        let t = j as f64 / b as f64;
        for i in 0..=a {
            let s = i as f64 / a as f64;
            vertices.push(
                Vertex::new(params.origin + params.u_axis * s + params.v_axis * t)
                    .with_uv(h * s, v * t),
            );
        }
    }

    let row = a + 1;
    let faces = (0..b)
        .flat_map(|j| (0..a).map(move |i| j * row + i))
        .map(|k| Face::quad([k, k + 1, k + row + 1, k + row]))
        .collect();
    fragment(vertices, faces)
}
