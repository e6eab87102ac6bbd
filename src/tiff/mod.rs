//! TIFF file format module
//!
//! Structures and functions for reading and writing TIFF and BigTIFF
//! containers and their GeoTIFF tags.

pub mod errors;
pub mod ifd;
pub(crate) mod types;
pub mod reader;
pub mod builder;
mod builders;
pub mod constants;
pub mod geo_key_parser;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{TiffError, TiffResult};
pub use ifd::{IFD, IFDEntry};
pub use reader::TiffReader;
pub use types::TIFF;
pub use geo_key_parser::{GeoInfo, GeoKeyEntry, GeoKeyParser};
pub use builder::{ChunkLayout, ImageOptions, TagData, TiffBuilder};
