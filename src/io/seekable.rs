//! Seekable reader trait
//!
//! The TIFF parser works against any source that can both read and seek:
//! a buffered file during normal use, an in-memory cursor in tests.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
