//! Tests for the TIFF builder and writer

extern crate std;

use std::io::Cursor;
use crate::io::byte_order::ByteOrder;
use crate::tiff::builder::{ChunkLayout, ImageOptions, TagData, TiffBuilder};
use crate::tiff::errors::TiffError;
use crate::tiff::geo_key_parser::GeoKeyParser;
use crate::tiff::reader::TiffReader;
use crate::tiff::constants::{compression, field_types, predictor, sample_format, tags};

fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|v| (v * 3) as f64).collect()
}

#[test]
fn test_written_tags_read_back() {
    let options = ImageOptions::new(5, 4, 2)
        .with_samples(16, sample_format::UNSIGNED)
        .with_layout(ChunkLayout::Strips { rows_per_strip: 3 });

    let mut builder = TiffBuilder::new(false);
    let index = builder.add_image(&options, &ramp(5 * 4 * 2)).unwrap();
    builder.set_pixel_scale_and_tiepoint(index, [0.5, 0.25, 0.0], [0.0, 0.0, 0.0, 10.0, 20.0, 0.0]).unwrap();
    builder.set_geo_keys(index, 4326, true).unwrap();

    let mut cursor = Cursor::new(Vec::new());
    builder.write_to(&mut cursor).unwrap();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    std::assert_eq!(ifd.get_dimensions(), Some((5, 4)));
    std::assert_eq!(ifd.get_samples_per_pixel(), 2);
    std::assert!(!ifd.is_tiled());
    std::assert_eq!(reader.read_tag_values(&mut cursor, ifd, tags::BITS_PER_SAMPLE).unwrap(), vec![16, 16]);
    std::assert_eq!(reader.read_tag_values(&mut cursor, ifd, tags::EXTRA_SAMPLES).unwrap(), vec![0]);

    // 4 rows in strips of 3 -> 2 strips, 3*5*2*2 and 1*5*2*2 bytes
    let counts = reader.read_tag_values(&mut cursor, ifd, tags::STRIP_BYTE_COUNTS).unwrap();
    std::assert_eq!(counts, vec![60, 20]);
    let offsets = reader.read_tag_values(&mut cursor, ifd, tags::STRIP_OFFSETS).unwrap();
    std::assert_eq!(offsets.len(), 2);
    std::assert!(offsets.iter().all(|o| o % 4 == 0));

    let info = GeoKeyParser::extract_geo_info(&reader, &mut cursor, ifd).unwrap();
    std::assert_eq!(info.epsg_code, Some(4326));
    std::assert_eq!(info.pixel_scale, Some([0.5, 0.25, 0.0]));
}

#[test]
fn test_big_endian_bigtiff_read_back() {
    let options = ImageOptions::new(20, 18, 3)
        .with_planar(true)
        .with_layout(ChunkLayout::Tiles { width: 16, height: 16 })
        .with_compression(compression::DEFLATE);

    let mut matrix = [0.0; 16];
    matrix[0] = 2.0;
    matrix[3] = 100.0;
    matrix[5] = -2.0;
    matrix[7] = 50.0;
    matrix[15] = 1.0;

    let mut builder = TiffBuilder::new(true).with_byte_order(ByteOrder::BigEndian);
    let index = builder.add_image(&options, &ramp(20 * 18 * 3).iter().map(|v| v % 256.0).collect::<Vec<_>>()).unwrap();
    builder.set_model_transformation(index, matrix).unwrap();

    let mut cursor = Cursor::new(Vec::new());
    builder.write_to(&mut cursor).unwrap();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    std::assert!(tiff.is_big_tiff);
    std::assert_eq!(tiff.byte_order, ByteOrder::BigEndian);

    let ifd = tiff.main_ifd().unwrap();
    std::assert!(ifd.is_tiled());
    // 2x2 tiles per band, 3 planes
    std::assert_eq!(reader.read_tag_values(&mut cursor, ifd, tags::TILE_OFFSETS).unwrap().len(), 12);
    std::assert_eq!(ifd.get_entry(tags::TILE_OFFSETS).unwrap().field_type, field_types::LONG8);

    let info = GeoKeyParser::extract_geo_info(&reader, &mut cursor, ifd).unwrap();
    std::assert_eq!(info.transformation, Some(matrix));
}

#[test]
fn test_custom_ascii_tag() {
    let mut builder = TiffBuilder::new(false);
    let index = builder.add_image(&ImageOptions::new(1, 1, 1), &[7.0]).unwrap();
    builder.set_tag(index, tags::GEO_ASCII_PARAMS_TAG, TagData::Ascii("WGS 84|".to_string())).unwrap();
    std::assert!(builder.set_tag(3, tags::GEO_ASCII_PARAMS_TAG, TagData::Shorts(vec![1])).is_err());

    let mut cursor = Cursor::new(Vec::new());
    builder.write_to(&mut cursor).unwrap();

    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ascii = reader.read_ascii(&mut cursor, tiff.main_ifd().unwrap(), tags::GEO_ASCII_PARAMS_TAG).unwrap();
    std::assert_eq!(ascii, "WGS 84|");
}

#[test]
fn test_invalid_options_are_rejected() {
    let float_with_predictor = ImageOptions::new(2, 2, 1)
        .with_samples(32, sample_format::IEEEFP)
        .with_predictor(predictor::HORIZONTAL_DIFFERENCING);
    std::assert!(std::matches!(float_with_predictor.validate(), Err(TiffError::UnsupportedSampleLayout(_))));

    let odd_depth = ImageOptions::new(2, 2, 1).with_samples(12, sample_format::UNSIGNED);
    std::assert!(odd_depth.validate().is_err());

    let lzw = ImageOptions::new(2, 2, 1).with_compression(compression::LZW);
    std::assert!(std::matches!(lzw.validate(), Err(TiffError::UnsupportedCompression(5))));

    let mut builder = TiffBuilder::new(false);
    std::assert!(builder.add_image(&ImageOptions::new(2, 2, 1), &[1.0, 2.0]).is_err());
}
