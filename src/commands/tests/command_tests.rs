//! Tests for argument parsing and command execution

extern crate std;

use std::fs;
use std::path::Path;

use crate::commands::{build_cli, CommandFactory, GeosegmentCommandFactory};
use crate::config::AppConfig;
use crate::coordinate::AffineTransform;
use crate::errors::GeoSegError;
use crate::raster::tests::fixtures;
use crate::raster::RasterReader;
use crate::tiff::builder::ImageOptions;

fn run(args: &[&str], config: &AppConfig) -> Result<(), GeoSegError> {
    let matches = build_cli().try_get_matches_from(args).unwrap();
    let command = GeosegmentCommandFactory::new().create_command(&matches, config)?;
    command.execute()
}

fn write_checkpoint(dir: &Path) -> String {
    let path = dir.join("region_grow.toml");
    fs::write(&path, "[region_grow]\ntolerances = [16.0, 32.0, 64.0]\nconnectivity = 8\n").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_grammar_is_consistent() {
    build_cli().debug_assert();
}

#[test]
fn test_missing_subcommand_is_rejected() {
    std::assert!(build_cli().try_get_matches_from(["geosegment"]).is_err());
    std::assert!(build_cli().try_get_matches_from(["geosegment", "locate", "a.tif", "--row", "1"]).is_err());
}

#[test]
fn test_rejects_non_tiff_input() {
    let error = run(&["geosegment", "inspect", "scene.png"], &AppConfig::default()).unwrap_err();
    std::assert_eq!(error.stage(), "arguments");
}

#[test]
fn test_segment_argument_validation() {
    let config = AppConfig::default();

    let error = run(&["geosegment", "segment", "a.tif", "--bands", "1,2"], &config).unwrap_err();
    std::assert!(std::matches!(error, GeoSegError::InvalidArgument { ref name, .. } if name == "bands"));

    let error = run(&["geosegment", "segment", "a.tif", "--geotiff"], &config).unwrap_err();
    std::assert!(std::matches!(error, GeoSegError::InvalidArgument { ref name, .. } if name == "geotiff"));

    let error = run(&["geosegment", "segment", "a.tif", "--max-size", "0"], &config).unwrap_err();
    std::assert!(std::matches!(error, GeoSegError::InvalidArgument { ref name, .. } if name == "max-size"));
}

#[test]
fn test_inspect_and_locate() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_raster(dir.path(), "scene.tif", &ImageOptions::new(20, 10, 4), true);
    let path = path.to_string_lossy().into_owned();
    let config = AppConfig::default();

    run(&["geosegment", "inspect", &path], &config).unwrap();
    run(&["geosegment", "locate", &path, "--row", "9", "--col", "19"], &config).unwrap();

    let error = run(&["geosegment", "locate", &path, "--row", "10", "--col", "0"], &config).unwrap_err();
    std::assert!(std::matches!(error, GeoSegError::InvalidArgument { ref name, .. } if name == "row"));
}

#[test]
fn test_locate_without_georeference() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_raster(dir.path(), "plain.tif", &ImageOptions::new(4, 4, 3), false);
    let path = path.to_string_lossy().into_owned();

    let error = run(&["geosegment", "locate", &path, "--row", "0", "--col", "0"], &AppConfig::default()).unwrap_err();
    std::assert_eq!(error.stage(), "transform");
}

#[test]
fn test_segment_writes_masks() {
    let dir = tempfile::tempdir().unwrap();
    let raster = fixtures::write_raster(dir.path(), "scene.tif", &ImageOptions::new(24, 16, 6), true);
    let raster = raster.to_string_lossy().into_owned();
    let checkpoint = write_checkpoint(dir.path());
    let output_dir = dir.path().join("masks");
    let output = output_dir.to_string_lossy().into_owned();

    run(&[
        "geosegment", "segment", &raster,
        "--checkpoint", &checkpoint, "--model", "region_grow",
        "--max-size", "12", "--bands", "1,3,5",
        "--output-dir", &output, "--geotiff",
    ], &AppConfig::default()).unwrap();

    for index in 0..3 {
        std::assert!(output_dir.join(std::format!("scene_mask_{}.png", index)).exists());
    }

    let mask = RasterReader::new().open_metadata(&output_dir.join("scene_mask_0.tif")).unwrap();
    std::assert_eq!((mask.width, mask.height, mask.band_count), (12, 8, 1));
    std::assert_eq!(mask.epsg, Some(32633));
    std::assert_eq!(mask.transform, Some(AffineTransform::from_origin(500000.0, 4649776.0, 60.0, -60.0).unwrap()));
}

#[test]
fn test_segment_single_mask() {
    let dir = tempfile::tempdir().unwrap();
    let raster = fixtures::write_raster(dir.path(), "scene.tif", &ImageOptions::new(8, 8, 3), true);
    let raster = raster.to_string_lossy().into_owned();
    let output_dir = dir.path().join("out");
    let output = output_dir.to_string_lossy().into_owned();

    let mut config = AppConfig::default();
    config.checkpoint = dir.path().join("region_grow.toml");
    write_checkpoint(dir.path());

    run(&["geosegment", "segment", &raster, "--single-mask", "-o", &output], &config).unwrap();
    std::assert!(output_dir.join("scene_mask_0.png").exists());
    std::assert!(!output_dir.join("scene_mask_1.png").exists());
}

#[test]
fn test_segment_with_unregistered_back_end() {
    let dir = tempfile::tempdir().unwrap();
    let raster = fixtures::write_raster(dir.path(), "scene.tif", &ImageOptions::new(8, 8, 3), true);
    let raster = raster.to_string_lossy().into_owned();
    let checkpoint = dir.path().join("sam_vit_b.pth");
    fs::write(&checkpoint, b"weights").unwrap();
    let checkpoint = checkpoint.to_string_lossy().into_owned();

    let error = run(&["geosegment", "segment", &raster, "--checkpoint", &checkpoint, "--model", "vit_b"],
                    &AppConfig::default()).unwrap_err();
    std::assert_eq!(error.stage(), "segmentation");
}
