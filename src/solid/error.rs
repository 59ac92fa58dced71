/// Why a generator refused its parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("{what} must be at least {min}; got {got}")]
    TooFewSegments {
        what: &'static str,
        min: u32,
        got: f64,
    },
    #[error("{what} must be at most {max}; got {got}")]
    TooManySegments {
        what: &'static str,
        max: u32,
        got: f64,
    },
    #[error("{0} is zero")]
    ZeroExtent(&'static str),
    #[error("{0} is not finite")]
    NonFinite(&'static str),
    #[error("{what} must not be negative; got {got}")]
    Negative { what: &'static str, got: f64 },
    #[error(transparent)]
    Mesh(#[from] hedron::Error),
}
