//! # See Also
//!
//! * [Mesh]
//! * [Vertex]

mod mesh;
pub use mesh::*;
