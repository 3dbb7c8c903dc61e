//! Error type shared by the list, table and sorting modules.

use thiserror::Error;

/// Result alias used by fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by positional and structural operations.
///
/// Lookups of absent keys are not errors; they return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A positional access fell outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A removal was requested on an empty collection.
    #[error("collection is empty")]
    EmptyCollection,

    /// A constructor or operation received an argument it cannot honor.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
