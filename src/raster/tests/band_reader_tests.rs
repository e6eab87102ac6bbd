//! Tests for decoding bands from every supported sample layout

extern crate std;

use std::io::Cursor;

use crate::io::byte_order::ByteOrder;
use crate::raster::{BandReader, SampleFormat, SampleLayout};
use crate::tiff::builder::{ChunkLayout, ImageOptions};
use crate::tiff::constants::{compression, predictor, sample_format};
use crate::tiff::errors::TiffError;
use crate::tiff::reader::TiffReader;
use super::fixtures;

const WIDTH: u32 = 23;
const HEIGHT: u32 = 17;
const BANDS: u16 = 5;

fn base_options() -> ImageOptions {
    ImageOptions::new(WIDTH, HEIGHT, BANDS)
        .with_layout(ChunkLayout::Strips { rows_per_strip: 4 })
}

fn decode(cursor: &mut Cursor<Vec<u8>>, bands: &[usize]) -> Result<Vec<Vec<f64>>, TiffError> {
    let mut tiff_reader = TiffReader::new();
    let tiff = tiff_reader.read(cursor)?;
    let ifd = tiff.main_ifd().unwrap();
    let layout = SampleLayout::from_ifd(&tiff_reader, cursor, ifd)?;
    let file_size = cursor.get_ref().len() as u64;

    let mut band_reader = BandReader {
        reader: cursor,
        tiff_reader: &tiff_reader,
        ifd,
        layout: &layout,
        width: WIDTH as usize,
        height: HEIGHT as usize,
        band_count: BANDS as usize,
        file_size,
    };
    band_reader.read_bands(bands, None)
}

fn assert_decodes_reference(options: &ImageOptions, big_tiff: bool, order: ByteOrder, offset: f64) {
    let mut cursor = fixtures::encode_with(options, big_tiff, order, offset);
    let bands = decode(&mut cursor, &[4, 0, 2]).unwrap();

    std::assert_eq!(bands.len(), 3);
    for (decoded, band) in bands.iter().zip([4, 0, 2]) {
        std::assert_eq!(decoded, &fixtures::band(WIDTH as usize, HEIGHT as usize, band, offset),
                        "band {} of {:?}", band, options);
    }
}

#[test]
fn test_uncompressed_chunky_strips() {
    assert_decodes_reference(&base_options(), false, ByteOrder::LittleEndian, 0.0);
}

#[test]
fn test_compressed_strips() {
    for code in [compression::DEFLATE, compression::ZSTD, compression::PACKBITS] {
        let options = base_options().with_compression(code);
        assert_decodes_reference(&options, false, ByteOrder::LittleEndian, 0.0);
    }
}

#[test]
fn test_tiles_clipped_at_edges() {
    let options = base_options()
        .with_layout(ChunkLayout::Tiles { width: 16, height: 16 })
        .with_compression(compression::DEFLATE);
    assert_decodes_reference(&options, false, ByteOrder::LittleEndian, 0.0);
}

#[test]
fn test_planar_configuration() {
    let options = base_options().with_planar(true);
    assert_decodes_reference(&options, false, ByteOrder::LittleEndian, 0.0);

    let tiled = options.with_layout(ChunkLayout::Tiles { width: 16, height: 16 });
    assert_decodes_reference(&tiled, false, ByteOrder::LittleEndian, 0.0);
}

#[test]
fn test_horizontal_predictor() {
    let options = base_options()
        .with_samples(16, sample_format::UNSIGNED)
        .with_predictor(predictor::HORIZONTAL_DIFFERENCING)
        .with_compression(compression::DEFLATE);
    assert_decodes_reference(&options, false, ByteOrder::LittleEndian, 1000.0);

    let planar = base_options()
        .with_planar(true)
        .with_predictor(predictor::HORIZONTAL_DIFFERENCING);
    assert_decodes_reference(&planar, false, ByteOrder::LittleEndian, 0.0);
}

#[test]
fn test_signed_and_float_samples() {
    let signed = base_options().with_samples(16, sample_format::SIGNED);
    assert_decodes_reference(&signed, false, ByteOrder::LittleEndian, -120.0);

    let signed_predicted = base_options()
        .with_samples(32, sample_format::SIGNED)
        .with_predictor(predictor::HORIZONTAL_DIFFERENCING);
    assert_decodes_reference(&signed_predicted, false, ByteOrder::LittleEndian, -50.0);

    let float32 = base_options().with_samples(32, sample_format::IEEEFP);
    assert_decodes_reference(&float32, false, ByteOrder::LittleEndian, 0.5);

    let float64 = base_options().with_samples(64, sample_format::IEEEFP)
        .with_compression(compression::ZSTD);
    assert_decodes_reference(&float64, false, ByteOrder::LittleEndian, -0.25);
}

#[test]
fn test_big_endian_bigtiff() {
    let options = base_options()
        .with_samples(16, sample_format::UNSIGNED)
        .with_layout(ChunkLayout::Tiles { width: 16, height: 16 });
    assert_decodes_reference(&options, true, ByteOrder::BigEndian, 300.0);

    let float32 = base_options().with_samples(32, sample_format::IEEEFP);
    assert_decodes_reference(&float32, false, ByteOrder::BigEndian, 0.0);
}

#[test]
fn test_truncated_file() {
    let mut cursor = fixtures::encode(&base_options(), 0.0);
    let len = cursor.get_ref().len();
    cursor.get_mut().truncate(len - 10);

    let result = decode(&mut cursor, &[0, 1, 2]);
    std::assert!(matches!(result, Err(TiffError::TruncatedData { .. })), "{:?}", result);
}

#[test]
fn test_oversized_dimensions_are_rejected() {
    let mut cursor = fixtures::encode(&base_options(), 0.0);
    let mut tiff_reader = TiffReader::new();
    let tiff = tiff_reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();
    let layout = SampleLayout::from_ifd(&tiff_reader, &mut cursor, ifd).unwrap();
    let file_size = cursor.get_ref().len() as u64;

    // Header claims 2^32 - 1 pixels on each side
    let mut band_reader = BandReader {
        reader: &mut cursor,
        tiff_reader: &tiff_reader,
        ifd,
        layout: &layout,
        width: u32::MAX as usize,
        height: u32::MAX as usize,
        band_count: BANDS as usize,
        file_size,
    };
    let result = band_reader.read_bands(&[0, 1, 2], None);
    std::assert!(matches!(result, Err(TiffError::ImageTooLarge(_))), "{:?}", result);

    // Small image, absurd tiles
    let tiles = SampleLayout { chunks: ChunkLayout::Tiles { width: u32::MAX, height: u32::MAX }, ..layout.clone() };
    let mut band_reader = BandReader {
        reader: &mut cursor,
        tiff_reader: &tiff_reader,
        ifd,
        layout: &tiles,
        width: WIDTH as usize,
        height: HEIGHT as usize,
        band_count: BANDS as usize,
        file_size,
    };
    let result = band_reader.read_bands(&[0], None);
    std::assert!(matches!(result, Err(TiffError::ImageTooLarge(_))), "{:?}", result);
}

#[test]
fn test_band_out_of_range() {
    let mut cursor = fixtures::encode(&base_options(), 0.0);
    std::assert!(decode(&mut cursor, &[0, 5, 1]).is_err());
}

#[test]
fn test_layout_from_ifd() {
    let options = base_options()
        .with_samples(16, sample_format::SIGNED)
        .with_planar(true)
        .with_compression(compression::ZSTD)
        .with_predictor(predictor::HORIZONTAL_DIFFERENCING);
    let mut cursor = fixtures::encode(&options, 0.0);

    let mut tiff_reader = TiffReader::new();
    let tiff = tiff_reader.read(&mut cursor).unwrap();
    let layout = SampleLayout::from_ifd(&tiff_reader, &mut cursor, tiff.main_ifd().unwrap()).unwrap();

    std::assert_eq!(layout, SampleLayout {
        bits_per_sample: 16,
        format: SampleFormat::Signed,
        planar: true,
        compression: compression::ZSTD,
        predictor: predictor::HORIZONTAL_DIFFERENCING,
        chunks: ChunkLayout::Strips { rows_per_strip: 4 },
    });
    std::assert!(layout.validate().is_ok());
}

#[test]
fn test_layout_validation() {
    let layout = SampleLayout {
        bits_per_sample: 8,
        format: SampleFormat::Unsigned,
        planar: false,
        compression: compression::NONE,
        predictor: predictor::NONE,
        chunks: ChunkLayout::Strips { rows_per_strip: 1 },
    };
    std::assert!(layout.validate().is_ok());

    let lzw = SampleLayout { compression: compression::LZW, ..layout.clone() };
    std::assert!(matches!(lzw.validate(), Err(TiffError::UnsupportedCompression(5))));

    let float_predictor = SampleLayout {
        bits_per_sample: 32,
        format: SampleFormat::Float,
        predictor: predictor::HORIZONTAL_DIFFERENCING,
        ..layout.clone()
    };
    std::assert!(matches!(float_predictor.validate(), Err(TiffError::UnsupportedSampleLayout(_))));

    let twelve_bit = SampleLayout { bits_per_sample: 12, ..layout.clone() };
    std::assert!(twelve_bit.validate().is_err());

    let float_predictor3 = SampleLayout { predictor: predictor::FLOATING_POINT, ..layout };
    std::assert!(float_predictor3.validate().is_err());
}
