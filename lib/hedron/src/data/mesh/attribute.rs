use nalgebra::{Point2, Point3, Point4, Vector3};

/// The kinds of data a [Vertex](crate::Vertex) may carry.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeUsage {
    Position,
    Normal,
    Texcoord,
    Color,
}

pub type Position = Point3<f64>;
pub type Normal = Vector3<f64>;
pub type Texcoord = Point2<f64>;
/// Linear RGBA, each channel in `0..=1`.
pub type Rgba = Point4<f32>;
