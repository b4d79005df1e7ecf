//! Error types for the LSP wire codecs.
//!
//! Every failure is handed back to the caller; nothing in this crate retries
//! or recovers locally, since a malformed URI or payload will not fix itself.

use thiserror::Error;

/// A specialized Result type for LSP wire operations.
pub type Result<T> = std::result::Result<T, LspError>;

/// The main error type for LSP wire operations.
#[derive(Error, Debug)]
pub enum LspError {
    /// The string is not a `file://` URI, or its path does not percent-decode
    /// to valid UTF-8.
    #[error("invalid URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// The JSON value is well formed but matches none of the expected shapes.
    #[error("decode error: {0}")]
    Decode(String),

    /// JSON syntax errors, or shape errors reported through serde.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A holder was read (or encoded) before any value was set or decoded.
    #[error("no value has been set or decoded")]
    UnsetAccess,

    /// No result decoder is known for the request method.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}

impl LspError {
    pub(crate) fn invalid_uri(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// True for both structural shape mismatches and malformed JSON.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, LspError::Decode(_) | LspError::Json(_))
    }
}
