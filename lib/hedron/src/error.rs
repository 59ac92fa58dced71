/// Errors related to [Meshes](crate::Mesh).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("a face needs at least 3 vertices; got {0}")]
    DegenerateFace(usize),
    #[error("face {face} references vertex {index}, but the mesh only has {len} vertices")]
    FaceOutOfRange { face: usize, index: u32, len: usize },
    #[error("edge {edge} references vertex {index}, but the mesh only has {len} vertices")]
    EdgeOutOfRange { edge: usize, index: u32, len: usize },
    #[error("mesh would hold {0} vertices, which is more than a u32 index can address")]
    IndexOverflow(usize),
}
