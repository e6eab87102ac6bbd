//! Promptable segmentation
//!
//! The engine trait, its registry of model variants, the built-in region
//! growing engine and a mutex wrapper for shared use.

mod engine;
mod region_grow;
mod registry;
mod serialized;


pub use self::engine::{predict, Mask, MaskSet, PointLabel, PromptPoint, SegmentationEngine};
pub use self::region_grow::RegionGrowEngine;
pub use self::registry::{available_variants, load_engine, register_engine, EngineLoader, SAM_VARIANTS};
pub use self::serialized::SerializedEngine;
