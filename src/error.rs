use thiserror::Error;

/// Errors surfaced by the tree operations.
///
/// `NotFound` is an expected outcome of a lookup or delete and is returned, never panicked on.
/// `OutOfRange` indicates a caller handed the engine a cursor that was already past the point
/// it asked to start from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtError {
    #[error("read of {offset} bytes past cursor with only {remaining} remaining")]
    OutOfRange { offset: usize, remaining: usize },

    #[error("key is already present in the tree")]
    DuplicateKey,

    #[error("key not found")]
    NotFound,

    /// The key is a strict prefix of a stored key, or a stored key is a strict prefix of it.
    /// Node shapes carry no end-of-key marker, so such pairs cannot coexist.
    #[error("key is a prefix of, or is prefixed by, a stored key")]
    PrefixConflict,
}
