//! Command pattern interfaces
//!
//! Every CLI operation is a `Command` built by a `CommandFactory` from the
//! parsed arguments and the loaded configuration.

use std::path::PathBuf;
use clap::ArgMatches;

use crate::config::AppConfig;
use crate::errors::{GeoSegError, GeoSegResult};
use crate::utils::mask_utils;

/// An executable CLI operation
pub trait Command {
    /// Runs the operation, printing its results to stdout
    fn execute(&self) -> GeoSegResult<()>;
}

/// Builds commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Creates the command selected by `args`
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `config` - Configuration the command falls back to for unset flags
    fn create_command(&self, args: &ArgMatches, config: &'a AppConfig) -> GeoSegResult<Box<dyn Command + 'a>>;
}

/// The `input` argument, which must name a `.tif` or `.tiff` file
pub(crate) fn input_path(args: &ArgMatches) -> GeoSegResult<PathBuf> {
    let input = args.get_one::<PathBuf>("input")
        .ok_or_else(|| GeoSegError::invalid_argument("input", "missing input file"))?;

    if !mask_utils::has_tiff_extension(input) {
        return Err(GeoSegError::invalid_argument(
            "input", format!("{} is not a .tif or .tiff file", input.display())
        ));
    }
    Ok(input.clone())
}
