//! Parametric solids, one generator per GameMaker `d3d_model_*` shape call.
//!
//! Every generator is a pure function from a parameter struct to a [Mesh] fragment whose
//! vertices all carry texture coordinates. Fragments index from 0; merging them is the
//! [builder's](crate::builder) job.
//!
//! # Conventions
//!
//! * z is up. Solids fill the axis-aligned box spanned by their two corners, `from` and `to`.
//! * Faces wind counter-clockwise when seen from outside, given `from < to` on every axis.
//! * Texture coordinates run `0..horizontal` around/across and `0..vertical` top to bottom, so a
//!   repeat of `2` tiles the texture twice.

mod block;
mod ellipsoid;
mod error;
mod frustum;
mod grid;

pub use block::*;
pub use ellipsoid::*;
pub use error::*;
pub use frustum::*;
pub use grid::*;

use hedron::Mesh;

/// Largest segment count any generator accepts along one direction.
pub const MAX_SEGMENTS: u32 = 4096;

/// Largest `steps` an ellipsoid accepts; it's used in both directions, so vertices grow with its
/// square.
pub const MAX_ELLIPSOID_STEPS: u32 = 256;

/// How many times a texture is tiled across a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexRepeat {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for TexRepeat {
    fn default() -> Self {
        Self {
            horizontal: 1.0,
            vertical: 1.0,
        }
    }
}

/// Convert a positional float parameter into a segment count, truncating toward zero.
///
/// # Errors
///
/// * [`TooFewSegments`](GeometryError::TooFewSegments) if the count is below `min`, negative, or NaN
/// * [`TooManySegments`](GeometryError::TooManySegments) if the count is above `max`
pub fn segment_param(
    what: &'static str,
    value: f64,
    min: u32,
    max: u32,
) -> Result<u32, GeometryError> {
    let n = value.trunc();
    if !(n >= min as f64) {
        return Err(GeometryError::TooFewSegments {
            what,
            min,
            got: value,
        });
    }
    if n > max as f64 {
        return Err(GeometryError::TooManySegments {
            what,
            max,
            got: value,
        });
    }
    Ok(n as u32)
}

#[inline]
fn check_segments(
    what: &'static str,
    n: u32,
    min: u32,
    max: u32,
) -> Result<u32, GeometryError> {
    segment_param(what, n as f64, min, max)
}

/// Reject extents that would flatten a solid.
#[inline]
fn check_extent(what: &'static str, extent: f64) -> Result<f64, GeometryError> {
    if !extent.is_finite() {
        return Err(GeometryError::NonFinite(what));
    }
    if extent == 0.0 {
        return Err(GeometryError::ZeroExtent(what));
    }
    Ok(extent)
}

/// Build the fragment from parts the generator produced itself.
#[inline]
fn fragment(
    vertices: Vec<hedron::Vertex>,
    faces: Vec<hedron::Face>,
) -> Result<Mesh, GeometryError> {
    Ok(Mesh::from_parts(vertices, faces, Vec::new())?)
}
