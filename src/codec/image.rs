//! Image recompression path
//!
//! The `lossless_image` method is the one deliberately non-invertible codec:
//! `compress` re-encodes any decodable raster image as a quality-100 JPEG,
//! while camera-raw containers bypass compression and pass through unchanged.
//! `decompress` is the identity, the path is one-way.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;

use crate::error::{LinkError, Result};

use super::{Codec, Method};

/// Magic prefixes of camera-raw containers that must pass through untouched.
///
/// DNG, NEF, CR2, and ARW are all TIFF-based; FUJIFILM RAF carries its own
/// signature.
const RAW_MAGICS: [&[u8]; 3] = [
    b"II*\x00", // TIFF little-endian (DNG/NEF/CR2/ARW)
    b"MM\x00*", // TIFF big-endian
    b"FUJIFILMCCD-RAW",
];

/// JPEG re-encoding codec with raw passthrough
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl ImageCodec {
    /// Whether the payload looks like a camera-raw container
    fn is_raw(data: &[u8]) -> bool {
        RAW_MAGICS.iter().any(|magic| data.starts_with(magic))
    }
}

impl Codec for ImageCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if Self::is_raw(data) {
            tracing::debug!("raw image container detected, passing through unchanged");
            return Ok(data.to_vec());
        }

        let img = image::load_from_memory(data).map_err(|e| LinkError::CodecFailure {
            method: Method::LosslessImage,
            cause: format!("not a decodable image: {e}"),
        })?;

        // JPEG cannot carry an alpha channel; normalize to RGB first
        let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());

        let mut out = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut out, 100);
        rgb.write_with_encoder(encoder)
            .map_err(|e| LinkError::CodecFailure {
                method: Method::LosslessImage,
                cause: format!("JPEG re-encode failed: {e}"),
            })?;

        Ok(out.into_inner())
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        // One-way path: the re-encoded JPEG is already the displayable form
        Ok(data.to_vec())
    }
}
