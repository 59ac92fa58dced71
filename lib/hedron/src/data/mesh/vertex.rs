use super::attribute::{AttributeUsage, Normal, Position, Rgba, Texcoord};

/// A point in a [Mesh](crate::Mesh), plus whatever optional data came with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Position,
    pub normal: Option<Normal>,
    pub uv: Option<Texcoord>,
    pub color: Option<Rgba>,
}

impl Vertex {
    #[inline]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            normal: None,
            uv: None,
            color: None,
        }
    }

    #[inline]
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(Position::new(x, y, z))
    }

    #[inline]
    pub fn with_uv(mut self, u: f64, v: f64) -> Self {
        self.uv = Some(Texcoord::new(u, v));
        self
    }

    #[inline]
    pub fn with_normal(mut self, normal: Normal) -> Self {
        self.normal = Some(normal);
        self
    }

    #[inline]
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Whether this vertex carries data for `usage`.
    pub fn has(&self, usage: AttributeUsage) -> bool {
        match usage {
            AttributeUsage::Position => true,
            AttributeUsage::Normal => self.normal.is_some(),
            AttributeUsage::Texcoord => self.uv.is_some(),
            AttributeUsage::Color => self.color.is_some(),
        }
    }
}
