//! Error types for downlink
//!
//! Provides a unified error type for all framing, codec, and link operations.

use thiserror::Error;

use crate::codec::Method;

/// Result type alias using LinkError
pub type Result<T> = std::result::Result<T, LinkError>;

/// Unified error type for downlink operations
#[derive(Debug, Error)]
pub enum LinkError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("invalid preamble: got {found:02x?}")]
    InvalidPreamble { found: [u8; 4] },

    #[error("truncated header: {0}")]
    TruncatedHeader(String),

    #[error("truncated payload: declared {declared} bytes, stream closed after {got}")]
    TruncatedPayload { declared: usize, got: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("unsupported compression method: {0:?}")]
    UnsupportedMethod(String),

    #[error("codec failure ({method}): {cause}")]
    CodecFailure { method: Method, cause: String },

    #[error("decompression failed ({method}): {cause}")]
    DecompressionFailed { method: Method, cause: String },

    #[error("recompression failed ({method}): {cause}")]
    RecompressionFailed { method: Method, cause: String },

    // -------------------------------------------------------------------------
    // Link Errors
    // -------------------------------------------------------------------------
    #[error("timed out waiting for peer")]
    Timeout,

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("remote error: {0}")]
    Remote(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}
