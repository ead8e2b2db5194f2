/// Pipeline failure types
use std::fmt;

/// Error raised by a rendering pipeline stage.
///
/// Any stage returning an error aborts the remaining chain; the caller
/// decides how to present it. Variants carry enough data to branch on
/// the cause.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A zero-length vector was fed to normalization, e.g. a camera
    /// looking at its own position.
    DegenerateVector(&'static str),
    /// A zero denominator while building a projection matrix.
    DivideByZero(&'static str),
    /// A triangle referenced a vertex index outside its mesh.
    InvalidIndex { index: usize, len: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::DegenerateVector(what) => {
                write!(f, "cannot normalize zero-length vector: {}", what)
            }
            RenderError::DivideByZero(what) => {
                write!(f, "division by zero: {}", what)
            }
            RenderError::InvalidIndex { index, len } => {
                write!(f, "vertex index {} out of range for mesh with {} vertices", index, len)
            }
        }
    }
}

impl std::error::Error for RenderError {}
