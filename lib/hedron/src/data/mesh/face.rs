use crate::Error;

/// An ordered loop of vertex indices.
///
/// Always holds at least 3 indices. Winding is whatever the producer gave it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Face(Vec<u32>);

impl Face {
    /// # Errors
    ///
    /// * [`DegenerateFace`](Error::DegenerateFace) if `indices` has fewer than 3 entries.
    pub fn new(indices: Vec<u32>) -> Result<Self, Error> {
        if indices.len() < 3 {
            return Err(Error::DegenerateFace(indices.len()));
        }
        Ok(Self(indices))
    }

    #[inline]
    pub fn tri(indices: [u32; 3]) -> Self {
        Self(indices.to_vec())
    }

    #[inline]
    pub fn quad(indices: [u32; 4]) -> Self {
        Self(indices.to_vec())
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    #[inline]
    #[allow(clippy::len_without_is_empty)] // never empty
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_triangle(&self) -> bool {
        self.0.len() == 3
    }

    /// Shift every index by `by`. The caller guarantees this can't overflow.
    pub(crate) fn offset(&mut self, by: u32) {
        for i in self.0.iter_mut() {
            *i += by;
        }
    }

    /// Split into triangles fanning out from the first index.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let first = self.0[0];
        self.0.windows(2).skip(1).map(move |w| [first, w[0], w[1]])
    }
}

impl From<[u32; 3]> for Face {
    fn from(value: [u32; 3]) -> Self {
        Self::tri(value)
    }
}

impl From<[u32; 4]> for Face {
    fn from(value: [u32; 4]) -> Self {
        Self::quad(value)
    }
}

impl TryFrom<Vec<u32>> for Face {
    type Error = Error;
    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
