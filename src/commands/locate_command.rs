//! Pixel location command
//!
//! Maps one pixel of a raster to latitude and longitude.

use std::path::PathBuf;
use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::{input_path, Command};
use crate::coordinate::CoordinateMapper;
use crate::errors::{GeoSegError, GeoSegResult};
use crate::raster::RasterReader;

/// Command for locating a pixel
pub struct LocateCommand {
    input: PathBuf,
    row: usize,
    col: usize,
}

impl LocateCommand {
    pub fn new(args: &ArgMatches) -> GeoSegResult<Self> {
        let input = input_path(args)?;
        let row = *args.get_one::<usize>("row")
            .ok_or_else(|| GeoSegError::invalid_argument("row", "missing row"))?;
        let col = *args.get_one::<usize>("col")
            .ok_or_else(|| GeoSegError::invalid_argument("col", "missing column"))?;

        Ok(LocateCommand { input, row, col })
    }
}

impl Command for LocateCommand {
    fn execute(&self) -> GeoSegResult<()> {
        let reader = RasterReader::new();
        let metadata = reader.open_metadata(&self.input)?;

        if self.row >= metadata.height {
            return Err(GeoSegError::invalid_argument(
                "row", format!("{} is outside 0..{}", self.row, metadata.height)));
        }
        if self.col >= metadata.width {
            return Err(GeoSegError::invalid_argument(
                "col", format!("{} is outside 0..{}", self.col, metadata.width)));
        }

        let transform = reader.get_transform(&self.input)?;
        let point = CoordinateMapper::pixel_to_geo(&transform, self.row, self.col);
        info!("Pixel (row {}, col {}) of {} is at {}", self.row, self.col, self.input.display(), point);

        println!("{}", point);
        Ok(())
    }
}
