//! Utility modules for common functionality
//!
//! Low-level helpers for the TIFF reader and writer, plus logging,
//! progress reporting and mask export.

pub mod logger;
pub mod progress;
pub mod mask_utils;
pub(crate) mod write_utils;
pub(crate) mod ifd_utils;
pub(crate) mod format_utils;
pub(crate) mod tag_utils;
