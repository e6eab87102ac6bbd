//! CLI command implementations
//!
//! `build_cli` describes the argument grammar; `GeosegmentCommandFactory`
//! turns parsed arguments into one of the commands below.

pub mod command_traits;
pub mod inspect_command;
pub mod locate_command;
pub mod segment_command;

#[cfg(test)]
mod tests;

pub use command_traits::{Command, CommandFactory};
pub use inspect_command::InspectCommand;
pub use locate_command::LocateCommand;
pub use segment_command::SegmentCommand;

use std::path::PathBuf;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};

use crate::config::AppConfig;
use crate::errors::{GeoSegError, GeoSegResult};

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input GeoTIFF file (.tif or .tiff)")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .index(1)
}

/// The `geosegment` argument grammar
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("geosegment")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Segment multiband GeoTIFFs and locate their centre")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(
            ClapCommand::new("inspect")
                .about("Show band count, dimensions, sample layout and georeferencing")
                .arg(input_arg()),
        )
        .subcommand(
            ClapCommand::new("locate")
                .about("Print the latitude and longitude of a pixel")
                .arg(input_arg())
                .arg(
                    Arg::new("row")
                        .long("row")
                        .help("Pixel row")
                        .value_name("ROW")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("col")
                        .long("col")
                        .help("Pixel column")
                        .value_name("COL")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            ClapCommand::new("segment")
                .about("Segment the raster around its centre pixel")
                .arg(input_arg())
                .arg(
                    Arg::new("bands")
                        .long("bands")
                        .help("Three 1-based band indices, e.g. '4,3,2'")
                        .value_name("A,B,C")
                        .value_delimiter(',')
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("max-size")
                        .long("max-size")
                        .help("Upper bound on the prepared image's longer side")
                        .value_name("PIXELS")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("checkpoint")
                        .long("checkpoint")
                        .help("Model checkpoint file")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .help("Model variant (region_grow, vit_b, vit_l, vit_h)")
                        .value_name("VARIANT"),
                )
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .help("Directory the masks are written to as PNG")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("geotiff")
                        .long("geotiff")
                        .help("Also write georeferenced GeoTIFF masks")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("single-mask")
                        .long("single-mask")
                        .help("Keep only the best-scoring mask")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Creates commands from `build_cli` matches
#[derive(Debug, Default)]
pub struct GeosegmentCommandFactory;

impl GeosegmentCommandFactory {
    pub fn new() -> Self {
        GeosegmentCommandFactory
    }
}

impl<'a> CommandFactory<'a> for GeosegmentCommandFactory {
    fn create_command(&self, args: &ArgMatches, config: &'a AppConfig) -> GeoSegResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("inspect", sub)) => Ok(Box::new(InspectCommand::new(sub)?)),
            Some(("locate", sub)) => Ok(Box::new(LocateCommand::new(sub)?)),
            Some(("segment", sub)) => Ok(Box::new(SegmentCommand::new(sub, config)?)),
            Some((other, _)) => Err(GeoSegError::invalid_argument("command", format!("unknown command {}", other))),
            None => Err(GeoSegError::invalid_argument("command", "expected inspect, locate or segment")),
        }
    }
}
