//! Segmentation command
//!
//! Runs the full pipeline on one raster, prints the centre coordinate and a
//! summary of every mask, and optionally writes the masks to disk.

use std::fs;
use std::path::{Path, PathBuf};
use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::{input_path, Command};
use crate::config::AppConfig;
use crate::errors::{GeoSegError, GeoSegResult};
use crate::pipeline::{Pipeline, SegmentationResult};
use crate::raster::RasterReader;
use crate::segmentation::load_engine;
use crate::utils::mask_utils;

/// Command for segmenting a raster
pub struct SegmentCommand {
    input: PathBuf,
    checkpoint: PathBuf,
    model_variant: String,
    max_image_size: usize,
    /// Explicit 1-based bands, heuristic when unset
    bands: Option<Vec<u32>>,
    output_dir: Option<PathBuf>,
    /// Also write georeferenced GeoTIFF masks
    geotiff: bool,
    multimask_output: bool,
}

impl SegmentCommand {
    /// Create a new segment command
    ///
    /// Flags given on the command line override the configuration.
    pub fn new(args: &ArgMatches, config: &AppConfig) -> GeoSegResult<Self> {
        let input = input_path(args)?;

        let checkpoint = args.get_one::<PathBuf>("checkpoint")
            .cloned()
            .unwrap_or_else(|| config.checkpoint.clone());
        let model_variant = args.get_one::<String>("model")
            .cloned()
            .unwrap_or_else(|| config.model_variant.clone());
        let max_image_size = args.get_one::<usize>("max-size")
            .copied()
            .unwrap_or(config.max_image_size);
        if max_image_size == 0 {
            return Err(GeoSegError::invalid_argument("max-size", "must be at least 1"));
        }

        let bands = args.get_many::<u32>("bands").map(|values| values.copied().collect::<Vec<_>>());
        if let Some(bands) = &bands {
            if bands.len() != 3 {
                return Err(GeoSegError::invalid_argument(
                    "bands", format!("expected 3 comma-separated bands, got {}", bands.len())));
            }
        }

        let output_dir = args.get_one::<PathBuf>("output-dir").cloned();
        let geotiff = args.get_flag("geotiff");
        if geotiff && output_dir.is_none() {
            return Err(GeoSegError::invalid_argument("geotiff", "requires --output-dir"));
        }

        debug!("Segment command: checkpoint={}, variant={}, max size={}, bands={:?}",
               checkpoint.display(), model_variant, max_image_size, bands);

        Ok(SegmentCommand {
            input,
            checkpoint,
            model_variant,
            max_image_size,
            bands,
            output_dir,
            geotiff,
            multimask_output: !args.get_flag("single-mask"),
        })
    }

    fn display_result(&self, result: &SegmentationResult) {
        println!("lat={:.8}, lon={:.8}", result.lat, result.lon);
        println!("Prompt: {} on a {}x{} image", result.prompt, result.image_width, result.image_height);

        for (index, mask) in result.masks.iter().enumerate() {
            let total = mask.width() * mask.height();
            let share = if total == 0 { 0.0 } else { 100.0 * mask.area() as f64 / total as f64 };
            match mask.score {
                Some(score) => println!("  Mask {}: {} pixels ({:.1}%), score {:.3}", index, mask.area(), share, score),
                None => println!("  Mask {}: {} pixels ({:.1}%)", index, mask.area(), share),
            }
        }
    }

    fn write_masks(&self, result: &SegmentationResult, output_dir: &Path, reader: &RasterReader) -> GeoSegResult<()> {
        fs::create_dir_all(output_dir).map_err(|e| GeoSegError::output(output_dir, e))?;

        for (index, mask) in result.masks.iter().enumerate() {
            let png_path = mask_utils::mask_output_path(output_dir, &self.input, index, "png");
            mask_utils::save_mask_png(mask, &png_path)?;
            println!("  Wrote {}", png_path.display());
        }

        if !self.geotiff {
            return Ok(());
        }

        let metadata = reader.open_metadata(&self.input)?;
        let transform = metadata.transform
            .ok_or_else(|| GeoSegError::invalid_transform(&self.input, "no georeferencing tags"))?;

        for (index, mask) in result.masks.iter().enumerate() {
            let scaled = transform
                .scaled_for_image(
                    mask.width() as f64 / metadata.width as f64,
                    mask.height() as f64 / metadata.height as f64,
                )
                .map_err(|e| GeoSegError::invalid_transform(&self.input, e))?;
            let tiff_path = mask_utils::mask_output_path(output_dir, &self.input, index, "tif");
            mask_utils::save_mask_geotiff(mask, &scaled, metadata.epsg, &tiff_path)?;
            println!("  Wrote {}", tiff_path.display());
        }

        Ok(())
    }
}

impl Command for SegmentCommand {
    fn execute(&self) -> GeoSegResult<()> {
        info!("Segmenting {} with {} ({})", self.input.display(), self.model_variant, self.checkpoint.display());

        let engine = load_engine(&self.checkpoint, &self.model_variant)?;
        let reader = RasterReader::new().with_progress(true);
        let pipeline = Pipeline::new(engine)
            .with_max_image_size(self.max_image_size)
            .with_bands(self.bands.clone())
            .with_multimask_output(self.multimask_output)
            .with_reader(reader.clone());

        let result = pipeline.process(&self.input)?;
        self.display_result(&result);

        if let Some(output_dir) = &self.output_dir {
            self.write_masks(&result, output_dir, &reader)?;
        }

        info!("Segmentation of {} produced {} mask(s)", self.input.display(), result.masks.len());
        Ok(())
    }
}
