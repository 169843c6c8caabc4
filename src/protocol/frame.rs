//! Frame definitions
//!
//! The parsed forms of the two wire frames, plus the statistics record
//! carried by the response.

use crate::codec::Method;

/// A parsed request frame
#[derive(Debug, Clone)]
pub struct RequestFrame {
    /// Compression method governing this transaction
    pub method: Method,

    /// The (typically compressed) payload bytes
    pub payload: Vec<u8>,
}

impl RequestFrame {
    pub fn new(method: Method, payload: Vec<u8>) -> Self {
        Self { method, payload }
    }
}

/// Round-trip compression statistics
///
/// Field widths match the wire header exactly; the ratio is derived and
/// non-authoritative (the payload length is governed by `recompressed_size`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferStats {
    /// Length of the received compressed payload
    pub original_size: i32,

    /// Length after decompression
    pub decompressed_size: i32,

    /// Length after recompression with the same method
    pub recompressed_size: i32,

    /// Size reduction from decompressed to recompressed, as a percentage.
    /// Positive means recompression shrank the payload; can be negative.
    pub compression_ratio: f32,
}

impl TransferStats {
    /// Compute statistics from the three observed lengths.
    ///
    /// A zero decompressed size reports a ratio of 0 rather than dividing
    /// by zero. Lengths beyond the i32 header fields saturate at `i32::MAX`
    /// rather than wrapping negative; the ratio is still computed from the
    /// true lengths.
    pub fn compute(original: usize, decompressed: usize, recompressed: usize) -> Self {
        let compression_ratio = if decompressed == 0 {
            0.0
        } else {
            (decompressed as f32 - recompressed as f32) / decompressed as f32 * 100.0
        };

        Self {
            original_size: saturate_size(original),
            decompressed_size: saturate_size(decompressed),
            recompressed_size: saturate_size(recompressed),
            compression_ratio,
        }
    }
}

fn saturate_size(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// A parsed response frame
#[derive(Debug, Clone)]
pub struct ResponseFrame {
    /// Round-trip statistics
    pub stats: TransferStats,

    /// The recompressed payload; its length equals `stats.recompressed_size`
    pub payload: Vec<u8>,
}

impl ResponseFrame {
    pub fn new(stats: TransferStats, payload: Vec<u8>) -> Self {
        Self { stats, payload }
    }
}
