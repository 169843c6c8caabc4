//! Run-Length codec
//!
//! The one algorithm implemented natively. Each maximal run of identical
//! bytes becomes a (value, count) pair with count in 1..=255; runs longer
//! than 255 bytes are split into consecutive pairs.

use crate::error::{LinkError, Result};

use super::Codec;

/// Native run-length encoder/decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct RleCodec;

impl Codec for RleCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();

        let mut bytes = data.iter();
        let Some(&first) = bytes.next() else {
            return Ok(out);
        };

        let mut value = first;
        let mut count: u8 = 1;

        for &byte in bytes {
            if byte == value && count < 255 {
                count += 1;
            } else {
                out.push(value);
                out.push(count);
                value = byte;
                count = 1;
            }
        }

        // Final run
        out.push(value);
        out.push(count);

        Ok(out)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() % 2 != 0 {
            return Err(LinkError::MalformedInput(format!(
                "run-length stream has a dangling value byte ({} bytes total)",
                data.len()
            )));
        }

        let mut out = Vec::new();
        for pair in data.chunks_exact(2) {
            let (value, count) = (pair[0], pair[1]);
            if count == 0 {
                return Err(LinkError::MalformedInput(
                    "run-length pair with zero count".to_string(),
                ));
            }
            out.extend(std::iter::repeat(value).take(count as usize));
        }

        Ok(out)
    }
}
