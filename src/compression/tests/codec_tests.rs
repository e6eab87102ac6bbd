//! Tests for the compression handlers

extern crate std;

use crate::compression::{CompressionFactory, CompressionHandler, PackBitsHandler};
use crate::tiff::errors::TiffError;

fn sample_strip() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&[7u8; 40]);
    data.extend((0u8..50).map(|v| v.wrapping_mul(37)));
    data.extend_from_slice(&[0u8; 300]);
    data.push(9);
    data
}

#[test]
fn test_packbits_decodes_reference_sequence() {
    // Example stream from the TIFF 6.0 specification, section 9
    let packed = [
        0xFEu8, 0xAA, 0x02, 0x80, 0x00, 0x2A, 0xFD, 0xAA, 0x03, 0x80, 0x00, 0x2A, 0x22, 0xF7, 0xAA,
    ];
    let expected = [
        0xAAu8, 0xAA, 0xAA, 0x80, 0x00, 0x2A, 0xAA, 0xAA, 0xAA, 0xAA, 0x80, 0x00, 0x2A, 0x22,
        0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA,
    ];

    let decoded = PackBitsHandler.decompress(&packed, expected.len()).unwrap();
    std::assert_eq!(decoded, expected.to_vec());
}

#[test]
fn test_packbits_rejects_truncated_literal() {
    let packed = [0x05u8, 1, 2];
    std::assert!(PackBitsHandler.decompress(&packed, 6).is_err());
}

#[test]
fn test_packbits_long_runs_split_at_128() {
    let data = vec![3u8; 300];
    let packed = PackBitsHandler.compress(&data).unwrap();

    // 128 + 128 + 44 -> three replicate runs of two bytes each
    std::assert_eq!(packed.len(), 6);
    std::assert_eq!(PackBitsHandler.decompress(&packed, data.len()).unwrap(), data);
}

#[test]
fn test_every_supported_codec_restores_strip() {
    let data = sample_strip();

    for code in [1u64, 8, 14, 32773, 32946] {
        let handler = CompressionFactory::create_handler(code).unwrap();
        let packed = handler.compress(&data).unwrap();
        let restored = handler.decompress(&packed, data.len()).unwrap();
        std::assert_eq!(restored, data, "codec {} ({})", code, handler.name());
    }
}

#[test]
fn test_unsupported_codes_are_reported() {
    for code in [5u64, 7, 34712] {
        match CompressionFactory::create_handler(code) {
            Err(TiffError::UnsupportedCompression(c)) => std::assert_eq!(c, code),
            _ => std::panic!("compression {} should be unsupported", code),
        }
        std::assert!(!CompressionFactory::is_supported(code));
    }
}
