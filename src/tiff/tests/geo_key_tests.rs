//! Tests for GeoTIFF tag parsing

extern crate std;

use crate::tiff::geo_key_parser::{GeoKeyParser, get_key_name};
use crate::tiff::reader::TiffReader;
use crate::tiff::constants::geo_keys;
use super::test_utils;

#[test]
fn test_parse_geo_key_directory() {
    let mut cursor = test_utils::create_geotiff_buffer();
    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    let keys = GeoKeyParser::parse_geo_key_directory(&reader, &mut cursor, ifd).unwrap();
    std::assert_eq!(keys.len(), 3);
    std::assert_eq!(keys[0].key_id, geo_keys::MODEL_TYPE);
    std::assert_eq!(keys[2].key_id, geo_keys::PROJECTED_CS_TYPE);
    std::assert_eq!(keys[2].inline_value(), Some(32633));
    std::assert_eq!(get_key_name(keys[2].key_id), "ProjectedCSTypeGeoKey");
}

#[test]
fn test_extract_geo_info() {
    let mut cursor = test_utils::create_geotiff_buffer();
    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    std::assert!(ifd.has_georeferencing());
    let info = GeoKeyParser::extract_geo_info(&reader, &mut cursor, ifd).unwrap();

    std::assert_eq!(info.epsg_code, Some(32633));
    std::assert_eq!(info.model_type, Some(1));
    std::assert_eq!(info.pixel_scale, Some([30.0, 30.0, 0.0]));
    std::assert_eq!(info.tiepoint, Some([0.0, 0.0, 0.0, 500000.0, 4649776.0, 0.0]));
    std::assert!(info.transformation.is_none());
    std::assert!(info.has_transform());
}

#[test]
fn test_plain_tiff_has_no_geo_info() {
    let mut cursor = test_utils::create_test_tiff_buffer();
    let mut reader = TiffReader::new();
    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();

    let info = GeoKeyParser::extract_geo_info(&reader, &mut cursor, ifd).unwrap();
    std::assert!(!info.has_transform());
    std::assert_eq!(info.epsg_code, None);
}
