mod attribute;
mod face;
mod vertex;

pub use attribute::*;
pub use face::*;
pub use vertex::*;

use crate::Error;

/// A set of vertices, edges, and faces.
///
/// # Characteristics
///
/// * Faces and edges refer to vertices by their position in [`vertices`](Mesh::vertices).
/// * Vertices are never deduplicated; a vertex referenced by nothing is a loose point.
/// * Indices are `u32`, so a mesh holds at most `u32::MAX + 1` vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    edges: Vec<[u32; 2]>,
}

static_assertions::assert_impl_all!(Mesh: Send, Sync);

impl Mesh {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a mesh from parts, checking that every index is in range.
    pub fn from_parts(
        vertices: Vec<Vertex>,
        faces: Vec<Face>,
        edges: Vec<[u32; 2]>,
    ) -> Result<Self, Error> {
        let res = Self {
            vertices,
            faces,
            edges,
        };
        res.validate()?;
        Ok(res)
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<Face>, Vec<[u32; 2]>) {
        (self.vertices, self.faces, self.edges)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True if this mesh has no vertices (and therefore nothing else).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Add a vertex, returning its index.
    ///
    /// # Errors
    ///
    /// * [`IndexOverflow`](Error::IndexOverflow) if the new vertex couldn't be addressed by a `u32`.
    pub fn push_vertex(&mut self, vertex: Vertex) -> Result<u32, Error> {
        let idx = u32::try_from(self.vertices.len())
            .map_err(|_| Error::IndexOverflow(self.vertices.len() + 1))?;
        self.vertices.push(vertex);
        Ok(idx)
    }

    /// Add a face. Indices aren't checked until [`validate`](Mesh::validate).
    #[inline]
    pub fn push_face(&mut self, face: impl Into<Face>) {
        self.faces.push(face.into());
    }

    /// Add a loose edge. Indices aren't checked until [`validate`](Mesh::validate).
    #[inline]
    pub fn push_edge(&mut self, edge: [u32; 2]) {
        self.edges.push(edge);
    }

    /// Move everything in `other` to the end of `self`, shifting `other`'s indices past the
    /// vertices already in `self`.
    ///
    /// # Errors
    ///
    /// * [`IndexOverflow`](Error::IndexOverflow) if the combined vertex table is too large;
    ///   `self` is left untouched in that case.
    pub fn append(&mut self, other: Mesh) -> Result<(), Error> {
        let total = self.vertices.len() + other.vertices.len();
        if total > u32::MAX as usize + 1 {
            return Err(Error::IndexOverflow(total));
        }
        // every valid index in `other` is < other.vertices.len(), so base + index fits
        let base = self.vertices.len() as u32;
        let Mesh {
            vertices,
            mut faces,
            mut edges,
        } = other;
        for face in faces.iter_mut() {
            face.offset(base);
        }
        for edge in edges.iter_mut() {
            edge[0] += base;
            edge[1] += base;
        }
        self.vertices.extend(vertices);
        self.faces.extend(faces);
        self.edges.extend(edges);
        Ok(())
    }

    /// Replace every face with more than 3 vertices by a triangle fan.
    pub fn triangulate(&mut self) {
        if self.faces.iter().all(Face::is_triangle) {
            return;
        }
        self.faces = self
            .faces
            .iter()
            .flat_map(|f| f.triangles().map(Face::tri).collect::<Vec<_>>())
            .collect();
    }

    /// True if every vertex carries `usage`. Vacuously true for an empty mesh.
    pub fn all_have(&self, usage: AttributeUsage) -> bool {
        self.vertices.iter().all(|v| v.has(usage))
    }

    /// Check that every face and edge refers to an existing vertex.
    pub fn validate(&self) -> Result<(), Error> {
        let len = self.vertices.len();
        for (face, f) in self.faces.iter().enumerate() {
            if let Some(&index) = f.indices().iter().find(|&&i| i as usize >= len) {
                return Err(Error::FaceOutOfRange { face, index, len });
            }
        }
        for (edge, e) in self.edges.iter().enumerate() {
            if let Some(&index) = e.iter().find(|&&i| i as usize >= len) {
                return Err(Error::EdgeOutOfRange { edge, index, len });
            }
        }
        Ok(())
    }
}
