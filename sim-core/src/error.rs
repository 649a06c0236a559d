use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations reported by the aggregation engine.
///
/// The growth process itself cannot fail; these only guard the inputs a
/// caller hands in.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Lattice size is zero or too large to allocate.
    #[error("invalid lattice size: {0}")]
    InvalidSize(String),

    /// A coordinate falls outside `[0, size)` on some axis.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
}
