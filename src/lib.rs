pub mod io;
pub mod tiff;
pub mod utils;
pub mod compression;
pub mod coordinate;
pub mod raster;
pub mod segmentation;
pub mod pipeline;
pub mod config;
pub mod errors;
pub mod commands;

pub use errors::{GeoSegError, GeoSegResult};
pub use config::AppConfig;
pub use coordinate::{AffineTransform, BoundingBox, CoordinateMapper, CoordinateSystem, GeoPoint};
pub use raster::{BandSelection, NormalizedImage, RasterMetadata, RasterReader};
pub use segmentation::{load_engine, Mask, MaskSet, PointLabel, PromptPoint, SegmentationEngine};
pub use pipeline::{Pipeline, SegmentationResult};
pub use tiff::TiffReader;
