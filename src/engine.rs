//! Engine Module
//!
//! The core transaction logic: given a received payload and its declared
//! method, decompress it, recompress it with the *same* method, and report
//! round-trip statistics.
//!
//! ## Transaction State Machine
//!
//! ```text
//! AwaitRequest ──► Decompress ──► Recompress ──► ComputeStats ──► SendResponse ──► Closed
//!       │               │               │
//!       └───────────────┴───────────────┴─────► SendError ──► Closed
//! ```
//!
//! The engine owns the middle three stages; the connection handler wraps it
//! with the request read and the response/error write. A transaction is
//! terminal on its first failure.

use std::sync::Arc;

use crate::codec::{CodecRegistry, Method};
use crate::error::{LinkError, Result};
use crate::protocol::TransferStats;

/// Result of one successful transaction
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Round-trip statistics for the response header
    pub stats: TransferStats,

    /// Payload recompressed with the sender's declared method
    pub recompressed: Vec<u8>,
}

/// The round-trip transfer engine
///
/// Stateless apart from the shared registry; safe to share across
/// connection threads.
pub struct TransferEngine {
    registry: Arc<CodecRegistry>,
}

impl TransferEngine {
    /// Create an engine over the given codec registry
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self { registry }
    }

    /// Run one transaction: decompress, recompress, compute statistics.
    ///
    /// The recompression always re-applies the method the sender declared,
    /// never a different one.
    pub fn process(&self, method: Method, payload: &[u8]) -> Result<TransferOutcome> {
        tracing::debug!(%method, received = payload.len(), "decompressing payload");
        let decompressed =
            self.registry
                .decompress(method, payload)
                .map_err(|e| LinkError::DecompressionFailed {
                    method,
                    cause: e.to_string(),
                })?;

        tracing::debug!(%method, decompressed = decompressed.len(), "recompressing payload");
        let recompressed = self
            .registry
            .compress(method, &decompressed)
            .map_err(|e| LinkError::RecompressionFailed {
                method,
                cause: e.to_string(),
            })?;

        let stats = TransferStats::compute(payload.len(), decompressed.len(), recompressed.len());
        tracing::debug!(
            original = stats.original_size,
            decompressed = stats.decompressed_size,
            recompressed = stats.recompressed_size,
            ratio = stats.compression_ratio,
            "transaction statistics computed"
        );

        Ok(TransferOutcome {
            stats,
            recompressed,
        })
    }

    /// The registry backing this engine
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }
}
