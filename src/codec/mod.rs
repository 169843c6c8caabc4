//! Codec Module
//!
//! Compression method identifiers and the capability table that maps each
//! method to a {compress, decompress} pair.
//!
//! ## Methods
//! - `deflate`        - zlib stream (flate2)
//! - `gzip`           - gzip container (flate2)
//! - `lzma`           - xz container (xz2)
//! - `brotli`         - brotli stream
//! - `lz4`            - LZ4 frame format (lz4_flex)
//! - `zstd`           - Zstandard frame
//! - `bzip2`          - bzip2 stream
//! - `rle`            - native run-length encoding
//! - `lossless_image` - JPEG quality-100 re-encode (one-way, see [`image`])
//!
//! Method identifiers are case-sensitive. The wire carries the text form;
//! internally every call site dispatches on the closed [`Method`] enum so an
//! unknown identifier is rejected once, at parse time.

mod image;
mod providers;
mod registry;
mod rle;

pub use self::image::ImageCodec;
pub use providers::{
    BrotliCodec, Bzip2Codec, DeflateCodec, GzipCodec, Lz4Codec, LzmaCodec, ZstdCodec,
};
pub use registry::CodecRegistry;
pub use rle::RleCodec;

use std::fmt;
use std::str::FromStr;

use crate::error::{LinkError, Result};

/// A compression method identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Deflate,
    Gzip,
    Lzma,
    Brotli,
    Lz4,
    Zstd,
    Bzip2,
    Rle,
    LosslessImage,
}

impl Method {
    /// All known methods, in registry order
    pub const ALL: [Method; 9] = [
        Method::Deflate,
        Method::Gzip,
        Method::Lzma,
        Method::Brotli,
        Method::Lz4,
        Method::Zstd,
        Method::Bzip2,
        Method::Rle,
        Method::LosslessImage,
    ];

    /// The wire-format text token for this method
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Deflate => "deflate",
            Method::Gzip => "gzip",
            Method::Lzma => "lzma",
            Method::Brotli => "brotli",
            Method::Lz4 => "lz4",
            Method::Zstd => "zstd",
            Method::Bzip2 => "bzip2",
            Method::Rle => "rle",
            Method::LosslessImage => "lossless_image",
        }
    }

    /// Whether compress followed by decompress reproduces the input exactly.
    ///
    /// False only for the image path, which re-encodes rather than inverts.
    pub fn is_lossless(&self) -> bool {
        !matches!(self, Method::LosslessImage)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = LinkError;

    /// Exact, case-sensitive match against the known identifiers
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deflate" => Ok(Method::Deflate),
            "gzip" => Ok(Method::Gzip),
            "lzma" => Ok(Method::Lzma),
            "brotli" => Ok(Method::Brotli),
            "lz4" => Ok(Method::Lz4),
            "zstd" => Ok(Method::Zstd),
            "bzip2" => Ok(Method::Bzip2),
            "rle" => Ok(Method::Rle),
            "lossless_image" => Ok(Method::LosslessImage),
            _ => Err(LinkError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// A compress/decompress capability pair
///
/// Implementations must be stateless with respect to individual calls so a
/// single instance can serve concurrent connections.
pub trait Codec: Send + Sync {
    /// Compress the exact byte sequence given
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the exact byte sequence given
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}
