//! Raster to masks and geocoordinate orchestration

mod orchestrator;

#[cfg(test)]
mod tests;

pub use self::orchestrator::{Pipeline, SegmentationResult};
