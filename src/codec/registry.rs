//! Codec Registry
//!
//! Immutable capability table mapping each [`Method`] to its codec. Built
//! once at startup and shared across connections; lookups never mutate.

use std::collections::HashMap;

use crate::error::{LinkError, Result};

use super::{
    BrotliCodec, Bzip2Codec, Codec, DeflateCodec, GzipCodec, ImageCodec, Lz4Codec, LzmaCodec,
    Method, RleCodec, ZstdCodec,
};

/// Capability table of all registered codecs
pub struct CodecRegistry {
    codecs: HashMap<Method, Box<dyn Codec>>,
}

impl CodecRegistry {
    /// Build a registry with every known method registered
    pub fn new() -> Self {
        let mut codecs: HashMap<Method, Box<dyn Codec>> = HashMap::new();

        codecs.insert(Method::Deflate, Box::new(DeflateCodec));
        codecs.insert(Method::Gzip, Box::new(GzipCodec));
        codecs.insert(Method::Lzma, Box::new(LzmaCodec));
        codecs.insert(Method::Brotli, Box::new(BrotliCodec));
        codecs.insert(Method::Lz4, Box::new(Lz4Codec));
        codecs.insert(Method::Zstd, Box::new(ZstdCodec));
        codecs.insert(Method::Bzip2, Box::new(Bzip2Codec));
        codecs.insert(Method::Rle, Box::new(RleCodec));
        codecs.insert(Method::LosslessImage, Box::new(ImageCodec));

        Self { codecs }
    }

    /// Compress `data` with the codec registered for `method`
    pub fn compress(&self, method: Method, data: &[u8]) -> Result<Vec<u8>> {
        self.lookup(method)?.compress(data)
    }

    /// Decompress `data` with the codec registered for `method`
    pub fn decompress(&self, method: Method, data: &[u8]) -> Result<Vec<u8>> {
        self.lookup(method)?.decompress(data)
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether the registry is empty (never, for the default build)
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    fn lookup(&self, method: Method) -> Result<&dyn Codec> {
        self.codecs
            .get(&method)
            .map(|c| c.as_ref())
            .ok_or_else(|| LinkError::UnsupportedMethod(method.as_str().to_string()))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}
