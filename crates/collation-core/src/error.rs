//! Error types for collation encoding and construction.

use thiserror::Error;

/// Errors that can occur while building, encoding, or decoding collation records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollationError {
    /// A field value is outside its semantic domain (e.g. a negative integer).
    #[error("invalid value for field {field}: {reason}")]
    InvalidFieldValue { field: &'static str, reason: String },

    /// A fixed-width field was given the wrong number of bytes.
    #[error("invalid width for field {field}: expected {expected} bytes, got {actual}")]
    InvalidFieldWidth {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The coinbase did not normalize to a canonical 20-byte address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Decode-time failure: truncated, over-long, or structurally invalid input.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// A signature did not verify against the given key and message.
    #[error("invalid signature")]
    InvalidSignature,

    /// Public key bytes are not a valid curve point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Configuration could not be loaded.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<rlp::DecoderError> for CollationError {
    fn from(e: rlp::DecoderError) -> Self {
        CollationError::MalformedEncoding(e.to_string())
    }
}

impl From<serde_json::Error> for CollationError {
    fn from(e: serde_json::Error) -> Self {
        CollationError::InvalidConfig(e.to_string())
    }
}

/// Result type for collation operations.
pub type Result<T> = std::result::Result<T, CollationError>;
