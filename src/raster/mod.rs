//! Multiband raster access
//!
//! Opens GeoTIFFs, decodes selected bands and turns them into the 8-bit,
//! 3-channel image a segmentation engine consumes.

mod band_reader;
mod band_selection;
mod metadata;
mod normalize;
mod reader;
mod resize;
mod source;

#[cfg(test)]
pub(crate) mod tests;

pub use self::band_reader::BandReader;
pub use self::band_selection::{BandSelection, BandSelectionError};
pub use self::metadata::{RasterMetadata, SampleFormat, SampleLayout};
pub use self::normalize::{normalize_band, NormalizedImage};
pub use self::reader::{RasterReader, DEFAULT_MAX_IMAGE_SIZE};
pub use self::resize::{resize_to_fit, scale_factor, target_dimensions};
pub use self::source::RasterSource;
