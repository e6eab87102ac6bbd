//! TIFF builder strategy modules
//!
//! Strategy implementations for the TiffBuilder, organized by
//! functionality category.

pub mod basic_tags;
pub mod chunk_encoder;
pub mod geo_tags;
pub mod writer;
