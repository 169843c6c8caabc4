//! Codec tests
//!
//! Method identifier parsing, the registry capability table, run-length
//! boundary behavior, the round-trip law for every lossless codec, and the
//! image path.

use std::io::Cursor;

use downlink::codec::{Codec, RleCodec};
use downlink::{CodecRegistry, LinkError, Method};

// =============================================================================
// Method Identifiers
// =============================================================================

#[test]
fn test_method_text_round_trip() {
    for method in Method::ALL {
        let parsed: Method = method.as_str().parse().unwrap();
        assert_eq!(parsed, method);
    }
}

#[test]
fn test_unknown_method_rejected() {
    let err = "unknown_xyz".parse::<Method>().unwrap_err();
    match err {
        LinkError::UnsupportedMethod(name) => assert_eq!(name, "unknown_xyz"),
        other => panic!("expected UnsupportedMethod, got {other:?}"),
    }
}

#[test]
fn test_method_parsing_is_case_sensitive() {
    assert!("RLE".parse::<Method>().is_err());
    assert!("Deflate".parse::<Method>().is_err());
}

#[test]
fn test_only_image_path_is_lossy() {
    for method in Method::ALL {
        assert_eq!(method.is_lossless(), method != Method::LosslessImage);
    }
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_registry_covers_all_methods() {
    let registry = CodecRegistry::new();
    assert_eq!(registry.len(), Method::ALL.len());
    assert!(!registry.is_empty());
}

#[test]
fn test_round_trip_law_for_all_lossless_codecs() {
    let registry = CodecRegistry::new();

    let samples: [&[u8]; 4] = [
        b"",
        b"hello satellite, hello ground station",
        &[0x41; 1000],
        &[0x00, 0xFF, 0x7F, 0x80, 0x01, 0xFE, 0x00, 0x00, 0x00],
    ];

    for method in Method::ALL.into_iter().filter(Method::is_lossless) {
        for sample in samples {
            let compressed = registry.compress(method, sample).unwrap();
            let restored = registry.decompress(method, &compressed).unwrap();
            assert_eq!(
                restored, sample,
                "round trip failed for {method} on {} bytes",
                sample.len()
            );
        }
    }
}

#[test]
fn test_gzip_emits_gzip_container() {
    // Same DEFLATE core as zlib, distinct container; the magic identifies it
    let registry = CodecRegistry::new();
    let compressed = registry
        .compress(Method::Gzip, b"telemetry telemetry telemetry")
        .unwrap();
    assert_eq!(&compressed[0..2], &[0x1F, 0x8B]);

    let restored = registry.decompress(Method::Gzip, &compressed).unwrap();
    assert_eq!(restored, b"telemetry telemetry telemetry");
}

#[test]
fn test_deflate_rejects_garbage() {
    let registry = CodecRegistry::new();
    let err = registry
        .decompress(Method::Deflate, b"definitely not a zlib stream")
        .unwrap_err();
    assert!(matches!(
        err,
        LinkError::CodecFailure {
            method: Method::Deflate,
            ..
        }
    ));
}

// =============================================================================
// Run-Length Codec
// =============================================================================

#[test]
fn test_rle_empty_input() {
    // Scenario A: empty payload compresses to empty, and back
    let codec = RleCodec;
    assert!(codec.compress(b"").unwrap().is_empty());
    assert!(codec.decompress(b"").unwrap().is_empty());
}

#[test]
fn test_rle_300_byte_run() {
    // Scenario B: 300 x 0x41 becomes exactly two pairs
    let codec = RleCodec;
    let payload = vec![0x41u8; 300];

    let compressed = codec.compress(&payload).unwrap();
    assert_eq!(compressed, vec![0x41, 255, 0x41, 45]);

    let restored = codec.decompress(&compressed).unwrap();
    assert_eq!(restored, payload);
}

#[test]
fn test_rle_run_boundary_at_255() {
    let codec = RleCodec;

    // Exactly 255: a single pair
    let compressed = codec.compress(&[0x7Au8; 255]).unwrap();
    assert_eq!(compressed, vec![0x7A, 255]);

    // 256: two pairs whose counts sum to 256
    let compressed = codec.compress(&[0x7Au8; 256]).unwrap();
    assert_eq!(compressed, vec![0x7A, 255, 0x7A, 1]);
}

#[test]
fn test_rle_mixed_runs() {
    let codec = RleCodec;
    let payload = b"aaabccccd";
    let compressed = codec.compress(payload).unwrap();
    assert_eq!(compressed, vec![b'a', 3, b'b', 1, b'c', 4, b'd', 1]);
    assert_eq!(codec.decompress(&compressed).unwrap(), payload);
}

#[test]
fn test_rle_truncated_pair_is_malformed() {
    let codec = RleCodec;
    let err = codec.decompress(&[0x41, 3, 0x42]).unwrap_err();
    assert!(matches!(err, LinkError::MalformedInput(_)));
}

#[test]
fn test_rle_zero_count_is_malformed() {
    let codec = RleCodec;
    let err = codec.decompress(&[0x41, 0]).unwrap_err();
    assert!(matches!(err, LinkError::MalformedInput(_)));
}

// =============================================================================
// Image Path
// =============================================================================

#[test]
fn test_image_recompresses_png_to_jpeg() {
    let registry = CodecRegistry::new();

    // A small gradient so the PNG is a real, decodable image
    let img = image::RgbImage::from_fn(16, 16, |x, y| {
        image::Rgb([(x * 16) as u8, (y * 16) as u8, 128])
    });
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, image::ImageFormat::Png).unwrap();

    let out = registry
        .compress(Method::LosslessImage, png.get_ref())
        .unwrap();
    // JPEG SOI marker
    assert_eq!(&out[0..2], &[0xFF, 0xD8]);
}

#[test]
fn test_image_raw_container_passes_through() {
    let registry = CodecRegistry::new();

    // TIFF little-endian signature, as carried by DNG/NEF/CR2/ARW
    let mut raw = b"II*\x00".to_vec();
    raw.extend_from_slice(&[0x13, 0x37, 0x00, 0x42, 0x99]);

    let out = registry.compress(Method::LosslessImage, &raw).unwrap();
    assert_eq!(out, raw);
}

#[test]
fn test_image_rejects_non_image_payload() {
    let registry = CodecRegistry::new();
    let err = registry
        .compress(Method::LosslessImage, b"plain text, not pixels")
        .unwrap_err();
    assert!(matches!(
        err,
        LinkError::CodecFailure {
            method: Method::LosslessImage,
            ..
        }
    ));
}

#[test]
fn test_image_decompress_is_identity() {
    let registry = CodecRegistry::new();
    let data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    assert_eq!(
        registry.decompress(Method::LosslessImage, &data).unwrap(),
        data
    );
}
