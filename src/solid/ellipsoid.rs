use std::f64::consts::{PI, TAU};

use hedron::{Face, Mesh, Vertex};
use nalgebra::{Point3, Vector3};

use super::{
    check_extent, check_segments, fragment, GeometryError, TexRepeat, MAX_ELLIPSOID_STEPS,
};

/// Parameters of `d3d_model_ellipsoid`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidParams {
    pub from: Point3<f64>,
    pub to: Point3<f64>,
    pub repeat: TexRepeat,
    /// Number of segments, both around the equator and from pole to pole.
    pub steps: u32,
}

impl Default for EllipsoidParams {
    fn default() -> Self {
        Self {
            from: Point3::new(-0.5, -0.5, -0.5),
            to: Point3::new(0.5, 0.5, 0.5),
            repeat: TexRepeat::default(),
            steps: 12,
        }
    }
}

/// A latitude/longitude ellipsoid inscribed in the box.
///
/// With `u = v = steps`: one vertex per pole plus `u` per interior ring (`u * (v - 1) + 2`
/// total), a triangle fan of `u` faces at each pole, and `u * (v - 2)` quads between rings.
///
/// Vertex order is the top pole, the rings from top to bottom, then the bottom pole.
///
/// Rings have no seam vertex, so the last column of faces maps U from `horizontal * (u - 1) / u`
/// back to `0` and shows that strip of texture mirrored.
pub fn ellipsoid(params: &EllipsoidParams) -> Result<Mesh, GeometryError> {
    let u = check_segments("steps", params.steps, 3, MAX_ELLIPSOID_STEPS)?;
    let v = u;
    let d = params.to - params.from;
    let radii = Vector3::new(
        check_extent("x diameter", d.x)?.abs(),
        check_extent("y diameter", d.y)?.abs(),
        check_extent("z diameter", d.z)?.abs(),
    ) / 2.0;
    let centre = nalgebra::center(&params.from, &params.to);
    let TexRepeat {
        horizontal: h,
        vertical: tv,
    } = params.repeat;

    let mut vertices = Vec::with_capacity((u * (v - 1) + 2) as usize);
    vertices.push(Vertex::new(centre + Vector3::z() * radii.z).with_uv(h / 2.0, 0.0));
    for k in 1..v {
        let (sin_phi, cos_phi) = (PI * k as f64 / v as f64).sin_cos();
        for i in 0..u {
            let (sin_theta, cos_theta) = (TAU * i as f64 / u as f64).sin_cos();
            let dir = Vector3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi);
            vertices.push(
                Vertex::new(centre + radii.component_mul(&dir))
                    .with_uv(h * i as f64 / u as f64, tv * k as f64 / v as f64),
            );
        }
    }
    let south = vertices.len() as u32;
    vertices.push(Vertex::new(centre - Vector3::z() * radii.z).with_uv(h / 2.0, tv));

    let ring = |k: u32| 1 + (k - 1) * u;
    let mut faces = Vec::with_capacity((u * v) as usize);
    for i in 0..u {
        let j = (i + 1) % u;
        faces.push(Face::tri([0, ring(1) + i, ring(1) + j]));
    }
    for k in 1..v - 1 {
        let (a, b) = (ring(k), ring(k + 1));
        for i in 0..u {
            let j = (i + 1) % u;
            faces.push(Face::quad([a + i, b + i, b + j, a + j]));
        }
    }
    let last = ring(v - 1);
    for i in 0..u {
        let j = (i + 1) % u;
        faces.push(Face::tri([south, last + j, last + i]));
    }

    fragment(vertices, faces)
}
