//! Tests for band selection, normalization and resizing

extern crate std;

use crate::raster::{
    normalize_band, resize_to_fit, scale_factor, target_dimensions,
    BandSelection, BandSelectionError, NormalizedImage,
};

#[test]
fn test_heuristic_selection() {
    std::assert_eq!(BandSelection::heuristic(8).indices(), [1, 2, 4]);
    std::assert_eq!(BandSelection::heuristic(6).indices(), [1, 1, 3]);
    std::assert_eq!(BandSelection::heuristic(4).indices(), [1, 1, 2]);
    std::assert_eq!(BandSelection::heuristic(13).indices(), [1, 3, 6]);
    std::assert_eq!(BandSelection::heuristic(8).zero_based(), vec![0, 1, 3]);
}

#[test]
fn test_heuristic_small_band_counts() {
    // n/4 and n/2 come out as 0 and are raised to the first band
    std::assert_eq!(BandSelection::heuristic(1).indices(), [1, 1, 1]);
    std::assert_eq!(BandSelection::heuristic(2).indices(), [1, 1, 1]);
    std::assert_eq!(BandSelection::heuristic(3).indices(), [1, 1, 1]);
}

#[test]
fn test_explicit_selection() {
    let selection = BandSelection::explicit(&[6, 5, 4], 6).unwrap();
    std::assert_eq!(selection.indices(), [6, 5, 4]);
    std::assert_eq!(selection.to_string(), "6,5,4");

    std::assert_eq!(BandSelection::explicit(&[7, 1, 1], 6),
                    Err(BandSelectionError::OutOfRange { band: 7, band_count: 6 }));
    std::assert_eq!(BandSelection::explicit(&[0, 1, 1], 6),
                    Err(BandSelectionError::OutOfRange { band: 0, band_count: 6 }));
    std::assert_eq!(BandSelection::explicit(&[1, 2], 6), Err(BandSelectionError::WrongCount(2)));

    std::assert_eq!(BandSelection::resolve(None, 8).unwrap(), BandSelection::heuristic(8));
}

#[test]
fn test_normalize_range_and_order() {
    let values = [10.0, -5.0, 3.0, 20.0, 20.0, 7.5];
    let normalized = normalize_band(&values);

    std::assert_eq!(normalized[1], 0);
    std::assert_eq!(normalized[3], 255);
    for i in 0..values.len() {
        for j in 0..values.len() {
            if values[i] < values[j] {
                std::assert!(normalized[i] <= normalized[j]);
            }
        }
    }
    // (3 - -5) / 25 * 255 = 81.6
    std::assert_eq!(normalized[2], 82);
}

#[test]
fn test_normalize_constant_band() {
    std::assert_eq!(normalize_band(&[42.0; 5]), vec![0; 5]);
    std::assert_eq!(normalize_band(&[]), Vec::<u8>::new());
}

#[test]
fn test_normalize_ignores_non_finite() {
    let normalized = normalize_band(&[0.0, f64::NAN, 100.0, f64::INFINITY, 50.0]);
    std::assert_eq!(normalized, vec![0, 0, 255, 0, 128]);

    std::assert_eq!(normalize_band(&[f64::NAN, f64::NAN]), vec![0, 0]);
}

#[test]
fn test_stack_bands() {
    let image = NormalizedImage::from_bands(2, 1, [&[1, 2], &[3, 4], &[5, 6]]).unwrap();
    std::assert_eq!(image.shape(), (1, 2, 3));
    std::assert_eq!(image.data(), &[1, 3, 5, 2, 4, 6]);
    std::assert_eq!(image.pixel(0, 1), [2, 4, 6]);

    std::assert!(NormalizedImage::from_bands(2, 2, [&[1, 2], &[3, 4], &[5, 6]]).is_none());
}

#[test]
fn test_scale_factor() {
    std::assert_eq!(scale_factor(4096, 2048, 2048), 0.5);
    std::assert_eq!(target_dimensions(4096, 2048, 2048), Some((2048, 1024)));

    std::assert_eq!(scale_factor(1000, 1000, 2048), 2.048);
    std::assert_eq!(target_dimensions(1000, 1000, 2048), None);
    std::assert_eq!(target_dimensions(2048, 2048, 2048), None);

    // Extreme aspect ratios never collapse a side to zero
    std::assert_eq!(target_dimensions(10000, 1, 100), Some((100, 1)));
}

#[test]
fn test_resize_to_fit() {
    let image = NormalizedImage::new(100, 50, vec![77; 100 * 50 * 3]).unwrap();
    let resized = resize_to_fit(image, 20);
    std::assert_eq!(resized.shape(), (10, 20, 3));
    std::assert!(resized.data().iter().all(|&v| (76..=78).contains(&v)));

    let small = NormalizedImage::new(3, 2, (0..18).collect()).unwrap();
    std::assert_eq!(resize_to_fit(small.clone(), 2048), small);
}
