//! I/O utilities for file handling
//!
//! Byte-order aware readers and the seekable reader abstraction shared
//! by the TIFF parser and the band decoder.

pub mod seekable;
pub mod byte_order;
