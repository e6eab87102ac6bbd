//! Custom error types for TIFF container processing

use std::fmt;
use std::io;

/// TIFF-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Invalid BigTIFF header
    InvalidBigTIFFHeader,
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// The file contains no readable image directory
    NoImageDirectory,
    /// Tag not found
    TagNotFound(u16),
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// Unsupported compression method
    UnsupportedCompression(u64),
    /// Image dimensions not found
    MissingDimensions,
    /// Sample layout (bit depth, format) that the decoder cannot handle
    UnsupportedSampleLayout(String),
    /// A codec rejected strip or tile data
    Codec { codec: &'static str, reason: String },
    /// Strip or tile data is shorter than its declared layout
    TruncatedData { expected: usize, actual: usize },
    /// A tag's value array reaches past the end of the file
    ValueOutOfBounds { tag: u16, end: u64, file_size: u64 },
    /// Declared dimensions exceed what the decoder will allocate
    ImageTooLarge(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            TiffError::InvalidBigTIFFHeader => write!(f, "Invalid BigTIFF header"),
            TiffError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            TiffError::NoImageDirectory => write!(f, "No image directory found"),
            TiffError::TagNotFound(tag) => write!(f, "Tag not found: {}", tag),
            TiffError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            TiffError::UnsupportedCompression(c) => write!(f, "Unsupported compression method: {}", c),
            TiffError::MissingDimensions => write!(f, "Image dimensions not found"),
            TiffError::UnsupportedSampleLayout(msg) => write!(f, "Unsupported sample layout: {}", msg),
            TiffError::Codec { codec, reason } => write!(f, "{} codec error: {}", codec, reason),
            TiffError::TruncatedData { expected, actual } => {
                write!(f, "Truncated image data: expected {} bytes, got {}", expected, actual)
            },
            TiffError::ValueOutOfBounds { tag, end, file_size } => {
                write!(f, "Values of tag {} end at byte {}, past the end of the {}-byte file", tag, end, file_size)
            },
            TiffError::ImageTooLarge(msg) => write!(f, "Image too large: {}", msg),
            TiffError::GenericError(msg) => write!(f, "TIFF error: {}", msg),
        }
    }
}

impl TiffError {
    pub fn codec(codec: &'static str, reason: impl fmt::Display) -> Self {
        TiffError::Codec { codec, reason: reason.to_string() }
    }
}

impl std::error::Error for TiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TiffError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
