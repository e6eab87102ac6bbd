//! Numeric codes of the TIFF 6.0, BigTIFF and GeoTIFF 1.1 formats
//!
//! Only the codes geosegment reads or writes are listed.

pub mod header {
    pub const TIFF_VERSION: u16 = 42;
    pub const BIG_TIFF_VERSION: u16 = 43;
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = *b"II";
    pub const BIG_ENDIAN_MARKER: [u8; 2] = *b"MM";
    /// Width of every offset in a BigTIFF file
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;
}

/// Entry field types; 16..=18 only occur in BigTIFF
pub mod field_types {
    pub const BYTE: u16 = 1;
    pub const ASCII: u16 = 2;
    pub const SHORT: u16 = 3;
    pub const LONG: u16 = 4;
    pub const RATIONAL: u16 = 5;
    pub const SBYTE: u16 = 6;
    pub const UNDEFINED: u16 = 7;
    pub const SSHORT: u16 = 8;
    pub const SLONG: u16 = 9;
    pub const SRATIONAL: u16 = 10;
    pub const FLOAT: u16 = 11;
    pub const DOUBLE: u16 = 12;
    pub const LONG8: u16 = 16;
    pub const SLONG8: u16 = 17;
    pub const IFD8: u16 = 18;
}

pub mod tags {
    // Baseline and extension tags
    pub const NEW_SUBFILE_TYPE: u16 = 254;
    pub const IMAGE_WIDTH: u16 = 256;
    pub const IMAGE_LENGTH: u16 = 257;
    pub const BITS_PER_SAMPLE: u16 = 258;
    pub const COMPRESSION: u16 = 259;
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262;
    pub const STRIP_OFFSETS: u16 = 273;
    pub const SAMPLES_PER_PIXEL: u16 = 277;
    pub const ROWS_PER_STRIP: u16 = 278;
    pub const STRIP_BYTE_COUNTS: u16 = 279;
    pub const PLANAR_CONFIGURATION: u16 = 284;
    pub const PREDICTOR: u16 = 317;
    pub const TILE_WIDTH: u16 = 322;
    pub const TILE_LENGTH: u16 = 323;
    pub const TILE_OFFSETS: u16 = 324;
    pub const TILE_BYTE_COUNTS: u16 = 325;
    pub const EXTRA_SAMPLES: u16 = 338;
    pub const SAMPLE_FORMAT: u16 = 339;

    // GeoTIFF
    pub const MODEL_PIXEL_SCALE_TAG: u16 = 33550;
    pub const MODEL_TIEPOINT_TAG: u16 = 33922;
    pub const MODEL_TRANSFORMATION_TAG: u16 = 34264;
    pub const GEO_KEY_DIRECTORY_TAG: u16 = 34735;
    pub const GEO_DOUBLE_PARAMS_TAG: u16 = 34736;
    pub const GEO_ASCII_PARAMS_TAG: u16 = 34737;
}

/// Values of the Compression tag
///
/// LZW and JPEG are recognised by name only; the decoder rejects them.
pub mod compression {
    pub const NONE: u16 = 1;
    pub const LZW: u16 = 5;
    pub const JPEG: u16 = 7;
    pub const DEFLATE: u16 = 8;
    pub const ZSTD: u16 = 14;
    pub const PACKBITS: u16 = 32773;
    /// Deflate code written by pre-6.0 software
    pub const DEFLATE_LEGACY: u16 = 32946;
}

pub mod photometric {
    pub const BLACK_IS_ZERO: u16 = 1;
    pub const RGB: u16 = 2;
}

pub mod planar_config {
    /// Samples of a pixel are interleaved
    pub const CHUNKY: u16 = 1;
    /// One plane per band
    pub const PLANAR: u16 = 2;
}

pub mod sample_format {
    pub const UNSIGNED: u16 = 1;
    pub const SIGNED: u16 = 2;
    pub const IEEEFP: u16 = 3;
}

pub mod predictor {
    pub const NONE: u16 = 1;
    pub const HORIZONTAL_DIFFERENCING: u16 = 2;
    /// Byte-shuffled float prediction, not decoded
    pub const FLOATING_POINT: u16 = 3;
}

/// Key ids inside the GeoKey directory
pub mod geo_keys {
    pub const MODEL_TYPE: u16 = 1024;
    pub const RASTER_TYPE: u16 = 1025;
    pub const GEOGRAPHIC_TYPE: u16 = 2048;
    pub const PROJECTED_CS_TYPE: u16 = 3072;
}

pub mod geo_key_values {
    pub const USER_DEFINED: u16 = 32767;
    pub const MODEL_TYPE_PROJECTED: u16 = 1;
    pub const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
    pub const RASTER_PIXEL_IS_AREA: u16 = 1;
    pub const RASTER_PIXEL_IS_POINT: u16 = 2;
}
