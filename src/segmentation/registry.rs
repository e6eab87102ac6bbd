//! Process-wide table of engine variants
//!
//! Variant names follow the SAM model registry (`vit_b`, `vit_l`,
//! `vit_h`) plus the built-in `region_grow` engine. The SAM variants need
//! an inference back end, which applications provide with
//! `register_engine`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::RwLock;
use lazy_static::lazy_static;
use log::{info, warn};

use crate::errors::{GeoSegError, GeoSegResult};

use super::engine::SegmentationEngine;
use super::region_grow::{self, RegionGrowEngine};

/// Builds an engine of the named variant from a checkpoint file
pub type EngineLoader = fn(&str, &Path) -> GeoSegResult<Box<dyn SegmentationEngine>>;

pub const SAM_VARIANTS: [&str; 3] = ["vit_b", "vit_l", "vit_h"];

lazy_static! {
    static ref ENGINE_REGISTRY: RwLock<HashMap<String, EngineLoader>> = {
        let mut registry: HashMap<String, EngineLoader> = HashMap::new();
        for variant in SAM_VARIANTS {
            registry.insert(variant.to_string(), load_sam_placeholder);
        }
        registry.insert(region_grow::VARIANT.to_string(), load_region_grow);
        RwLock::new(registry)
    };
}

fn load_region_grow(_variant: &str, checkpoint: &Path) -> GeoSegResult<Box<dyn SegmentationEngine>> {
    Ok(Box::new(RegionGrowEngine::from_checkpoint(checkpoint)?))
}

/// Checks the checkpoint and reports the missing back end
fn load_sam_placeholder(variant: &str, checkpoint: &Path) -> GeoSegResult<Box<dyn SegmentationEngine>> {
    fs::metadata(checkpoint).map_err(|e| GeoSegError::segmentation(
        format!("{} checkpoint {}", variant, checkpoint.display()), e
    ))?;
    Err(GeoSegError::segmentation(variant, format!(
        "no inference back end registered for {}; register one with register_engine or use {}",
        variant, region_grow::VARIANT
    )))
}

/// Adds or replaces the loader of a variant
pub fn register_engine(variant: &str, loader: EngineLoader) -> GeoSegResult<()> {
    let mut registry = ENGINE_REGISTRY.write()
        .map_err(|_| GeoSegError::segmentation(variant, "engine registry lock poisoned"))?;
    if registry.insert(variant.to_string(), loader).is_some() {
        warn!("Replacing loader for engine variant {}", variant);
    }
    Ok(())
}

/// Registered variant names, sorted
pub fn available_variants() -> Vec<String> {
    let mut variants: Vec<String> = match ENGINE_REGISTRY.read() {
        Ok(registry) => registry.keys().cloned().collect(),
        Err(_) => Vec::new(),
    };
    variants.sort();
    variants
}

/// Loads the engine for `model_variant` from `checkpoint_path`
///
/// Unknown variants and unreadable checkpoints are segmentation errors.
pub fn load_engine(checkpoint_path: &Path, model_variant: &str) -> GeoSegResult<Box<dyn SegmentationEngine>> {
    let loader = {
        let registry = ENGINE_REGISTRY.read()
            .map_err(|_| GeoSegError::segmentation(model_variant, "engine registry lock poisoned"))?;
        registry.get(model_variant).copied()
    };

    let loader = loader.ok_or_else(|| GeoSegError::segmentation(model_variant, format!(
        "unknown model variant, expected one of {}", available_variants().join(", ")
    )))?;

    info!("Loading {} engine from {}", model_variant, checkpoint_path.display());
    loader(model_variant, checkpoint_path)
}
