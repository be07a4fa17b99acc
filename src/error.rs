//! Error type shared by every stage of the huffpack pipeline.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffError>;

/// Everything that can go wrong while compressing or decompressing.
///
/// Empty input is not an error: compressing zero bytes yields a header with
/// no table entries and an empty payload.
#[derive(Debug, Error)]
pub enum HuffError {
    /// The underlying file or stream could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header is truncated or its fields contradict each other or the payload.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// Bits left over at the end of the payload, or a byte with no code during encoding.
    #[error("decode mismatch: {0}")]
    DecodeMismatch(String),
}

impl HuffError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        HuffError::MalformedHeader(message.into())
    }

    pub(crate) fn mismatch(message: impl Into<String>) -> Self {
        HuffError::DecodeMismatch(message.into())
    }
}
