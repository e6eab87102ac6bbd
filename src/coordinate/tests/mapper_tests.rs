//! Tests for pixel to geographic coordinate mapping

extern crate std;

use crate::coordinate::{AffineTransform, CoordinateMapper, CoordinateSystemFactory, CoordinateSystem, GeoPoint};

#[test]
fn test_axis_aligned_mapping() {
    let (x0, y0, sx, sy) = (500000.0, 4649776.0, 30.0, -30.0);
    let transform = AffineTransform::from_origin(x0, y0, sx, sy).unwrap();

    let point = CoordinateMapper::pixel_to_geo(&transform, 7, 3);
    std::assert_eq!(point, GeoPoint::new(y0 + 7.0 * sy, x0 + 3.0 * sx));
}

#[test]
fn test_column_feeds_longitude() {
    // Distinct steps per axis expose a swapped (row, col) order
    let transform = AffineTransform::from_origin(10.0, 50.0, 0.001, -0.002).unwrap();

    let along_col = CoordinateMapper::pixel_to_geo(&transform, 0, 100);
    std::assert_eq!(along_col.lat, 50.0);
    std::assert!((along_col.lon - 10.1).abs() < 1e-12);

    let along_row = CoordinateMapper::pixel_to_geo(&transform, 100, 0);
    std::assert_eq!(along_row.lon, 10.0);
    std::assert!((along_row.lat - 49.8).abs() < 1e-12);
}

#[test]
fn test_geo_to_pixel_round_trip() {
    let transform = AffineTransform::new([12.5, 0.25, 0.1, 41.0, 0.05, -0.25]).unwrap();
    let point = CoordinateMapper::pixel_to_geo(&transform, 40, 60);

    let pixel = CoordinateMapper::geo_to_pixel(&transform, &point).unwrap();
    std::assert!((pixel.row - 40.0).abs() < 1e-9);
    std::assert!((pixel.col - 60.0).abs() < 1e-9);

    let inside = crate::coordinate::PixelPoint::new(40.4, 60.7);
    std::assert_eq!(inside.to_index(100, 100), Some((40, 60)));
    std::assert_eq!(inside.to_index(50, 100), None);
}

#[test]
fn test_coordinate_systems() {
    std::assert_eq!(CoordinateSystemFactory::from_epsg(32633), CoordinateSystem::UTM(33, true));
    std::assert_eq!(CoordinateSystemFactory::from_epsg(32733).epsg_code(), 32733);
    std::assert!(CoordinateSystemFactory::from_epsg(4326).is_geographic());
    std::assert!(!CoordinateSystemFactory::from_epsg(3857).is_geographic());
    std::assert_eq!(CoordinateSystemFactory::from_epsg(32633).description(),
                    "WGS 84 / UTM zone 33N (EPSG:32633)");
}
