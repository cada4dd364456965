//! Error types for the prefix codec.
//!
//! None of these are transient: every variant signals either an internal
//! inconsistency or corrupted / incompatible persisted data, so nothing is
//! retried and nothing partial is persisted.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A byte of the input has no codebook entry.
    #[error("encoding error: byte {byte:#04x} at offset {offset} has no codebook entry")]
    Encoding { byte: u8, offset: usize },

    /// The bit-string does not walk the tree cleanly.
    #[error("decoding error at bit {bit}: {reason}")]
    Decoding { bit: usize, reason: &'static str },

    /// A codebook that cannot be turned back into a complete prefix tree.
    #[error("malformed codebook: {0}")]
    MalformedCodebook(String),

    /// Unknown algorithm name or out-of-range parameter.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Round-trip output differs from the original input.
    #[error(
        "verification failed: original {original_len} bytes, decoded {decoded_len} bytes, first mismatch at {first_mismatch:?}"
    )]
    Verification {
        original_len: usize,
        decoded_len: usize,
        first_mismatch: Option<usize>,
    },

    /// Archive bytes are truncated or do not follow the container layout.
    #[error("corrupt archive: {0}")]
    Container(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a decoding failure at bit offset `bit`.
    pub(crate) fn decoding(bit: usize, reason: &'static str) -> Self {
        Error::Decoding { bit, reason }
    }
}
