//! Error types for the tessellation engine.
use thiserror::Error;

/// Errors raised by the tessellation engine.
///
/// Two conditions the original design calls out explicitly are *not*
/// variants here: an interpolation query that lands in no simplex is not
/// an error (`interpolate` returns `Ok(0.0)`), and inserting a point
/// outside every simplex is silent (the vertex is appended with no
/// owning simplex, and `add_point` still returns `Ok(())`). Both are
/// documented on the functions that exhibit them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PavageError {
    #[error("dimension {0} is out of range [2, 15]")]
    DimensionOutOfRange(usize),

    #[error("coordinate index {index} is out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },

    #[error("matrix is not square: {rows} rows but a row of length {cols}")]
    MalformedMatrix { rows: usize, cols: usize },

    #[error("simplex has zero volume on the interpolation path")]
    DegenerateSimplex,

    #[error("file declares dimension {found}, expected {expected}")]
    FileFormatError { expected: usize, found: usize },
}
