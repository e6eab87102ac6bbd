//! Raster inspection command
//!
//! Prints what the pipeline will see of a raster: band count, dimensions,
//! sample layout and georeferencing.

use std::path::PathBuf;
use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::{input_path, Command};
use crate::coordinate::{BoundingBox, CoordinateSystemFactory};
use crate::errors::GeoSegResult;
use crate::raster::{BandSelection, RasterMetadata, RasterReader};

/// Command for describing a raster
pub struct InspectCommand {
    /// Path to the input file
    input: PathBuf,
}

impl InspectCommand {
    pub fn new(args: &ArgMatches) -> GeoSegResult<Self> {
        let input = input_path(args)?;
        Ok(InspectCommand { input })
    }

    fn display_structure(&self, metadata: &RasterMetadata) {
        println!("File: {}", self.input.display());
        println!("  Bands: {}", metadata.band_count);
        println!("  Dimensions: {}x{}", metadata.width, metadata.height);
        println!("  Samples: {}", metadata.sample);
        println!("  Default bands: {}", BandSelection::heuristic(metadata.band_count));
    }

    fn display_georeference(&self, metadata: &RasterMetadata) {
        match metadata.epsg {
            Some(code) => println!("  CRS: {}", CoordinateSystemFactory::from_epsg(code).description()),
            None => println!("  CRS: not declared"),
        }

        let transform = match &metadata.transform {
            Some(transform) => transform,
            None => {
                println!("  Transform: none");
                return;
            }
        };

        println!("  Transform: {}", transform);
        let bounds = BoundingBox::from_transform(transform, metadata.width, metadata.height);
        println!("  Extent: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                 bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y);
        println!("  Extent centre: {}", bounds.center());
    }
}

impl Command for InspectCommand {
    fn execute(&self) -> GeoSegResult<()> {
        info!("Inspecting {}", self.input.display());

        let metadata = RasterReader::new().open_metadata(&self.input)?;
        self.display_structure(&metadata);
        self.display_georeference(&metadata);

        debug!("Inspection completed");
        Ok(())
    }
}
