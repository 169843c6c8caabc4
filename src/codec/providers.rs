//! Crate-backed codec providers
//!
//! Each provider wraps one ecosystem compressor behind the [`Codec`]
//! contract. Formats match what the common command-line tools produce:
//! `deflate` is a zlib stream, `lzma` an xz container, `lz4` the LZ4 frame
//! format. Failures in either direction surface as `CodecFailure` with the
//! underlying cause.

use std::fmt::Display;
use std::io::{Read, Write};

use crate::error::{LinkError, Result};

use super::{Codec, Method};

fn codec_err(method: Method, cause: impl Display) -> LinkError {
    LinkError::CodecFailure {
        method,
        cause: cause.to_string(),
    }
}

// =============================================================================
// deflate (zlib stream, flate2)
// =============================================================================

/// zlib-format DEFLATE codec
#[derive(Debug, Clone, Copy, Default)]
pub struct DeflateCodec;

impl Codec for DeflateCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Deflate, e))?;
        encoder.finish().map_err(|e| codec_err(Method::Deflate, e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = flate2::write::ZlibDecoder::new(Vec::new());
        decoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Deflate, e))?;
        decoder.finish().map_err(|e| codec_err(Method::Deflate, e))
    }
}

// =============================================================================
// gzip (gzip container, flate2)
// =============================================================================

/// gzip-container DEFLATE codec
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipCodec;

impl Codec for GzipCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Gzip, e))?;
        encoder.finish().map_err(|e| codec_err(Method::Gzip, e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = flate2::write::GzDecoder::new(Vec::new());
        decoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Gzip, e))?;
        decoder.finish().map_err(|e| codec_err(Method::Gzip, e))
    }
}

// =============================================================================
// lzma (xz container, xz2)
// =============================================================================

/// xz-container LZMA codec
#[derive(Debug, Clone, Copy, Default)]
pub struct LzmaCodec;

impl Codec for LzmaCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
        encoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Lzma, e))?;
        encoder.finish().map_err(|e| codec_err(Method::Lzma, e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = xz2::write::XzDecoder::new(Vec::new());
        decoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Lzma, e))?;
        decoder.finish().map_err(|e| codec_err(Method::Lzma, e))
    }
}

// =============================================================================
// brotli
// =============================================================================

/// Brotli stream codec
#[derive(Debug, Clone, Copy, Default)]
pub struct BrotliCodec;

impl Codec for BrotliCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let params = brotli::enc::BrotliEncoderParams::default();
        let mut out = Vec::new();
        brotli::BrotliCompress(&mut &data[..], &mut out, &params)
            .map_err(|e| codec_err(Method::Brotli, e))?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        brotli::BrotliDecompress(&mut &data[..], &mut out)
            .map_err(|e| codec_err(Method::Brotli, e))?;
        Ok(out)
    }
}

// =============================================================================
// lz4 (frame format, lz4_flex)
// =============================================================================

/// LZ4 frame codec
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = lz4_flex::frame::FrameEncoder::new(Vec::new());
        encoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Lz4, e))?;
        encoder.finish().map_err(|e| codec_err(Method::Lz4, e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = lz4_flex::frame::FrameDecoder::new(&data[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .map_err(|e| codec_err(Method::Lz4, e))?;
        Ok(out)
    }
}

// =============================================================================
// zstd
// =============================================================================

/// Zstandard frame codec
#[derive(Debug, Clone, Copy, Default)]
pub struct ZstdCodec;

impl Codec for ZstdCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        zstd::stream::encode_all(&data[..], zstd::DEFAULT_COMPRESSION_LEVEL)
            .map_err(|e| codec_err(Method::Zstd, e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        zstd::stream::decode_all(&data[..]).map_err(|e| codec_err(Method::Zstd, e))
    }
}

// =============================================================================
// bzip2
// =============================================================================

/// bzip2 stream codec
#[derive(Debug, Clone, Copy, Default)]
pub struct Bzip2Codec;

impl Codec for Bzip2Codec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder =
            bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Bzip2, e))?;
        encoder.finish().map_err(|e| codec_err(Method::Bzip2, e))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = bzip2::write::BzDecoder::new(Vec::new());
        decoder
            .write_all(data)
            .map_err(|e| codec_err(Method::Bzip2, e))?;
        decoder.finish().map_err(|e| codec_err(Method::Bzip2, e))
    }
}
