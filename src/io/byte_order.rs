//! Byte order handling for TIFF files
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian). Handlers read header and
//! tag values from a stream and decode sample values from already
//! decompressed byte slices.

use byteorder::{BigEndian, ByteOrder as ByteOrderExt, LittleEndian, ReadBytesExt};
use std::io::Result;

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{TiffError, TiffResult};

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the TIFF header
    pub fn detect(reader: &mut dyn SeekableReader) -> TiffResult<Self> {
        let byte_order = reader.read_u16::<LittleEndian>()?;
        match byte_order {
            0x4949 => Ok(ByteOrder::LittleEndian), // "II" (Intel)
            0x4D4D => Ok(ByteOrder::BigEndian),    // "MM" (Motorola)
            _ => Err(TiffError::InvalidByteOrder(byte_order)),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
///
/// Stream readers are used while walking the IFD chain; the `decode_*`
/// methods work on slices of decompressed strip or tile data, where the
/// caller has already checked that the slice is long enough.
pub trait ByteOrderHandler: Send + Sync {
    /// The byte order this handler implements
    fn order(&self) -> ByteOrder;

    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Read a u64 value
    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64>;

    /// Read an f64 value
    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64>;

    /// Read a rational value (two u32 values as numerator/denominator)
    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)>;

    /// Decode a u16 from the first two bytes of `buf`
    fn decode_u16(&self, buf: &[u8]) -> u16;

    /// Decode a u32 from the first four bytes of `buf`
    fn decode_u32(&self, buf: &[u8]) -> u32;

    /// Decode a u64 from the first eight bytes of `buf`
    fn decode_u64(&self, buf: &[u8]) -> u64;

    /// Encode a u16 into the first two bytes of `buf`
    fn encode_u16(&self, buf: &mut [u8], value: u16);

    /// Encode a u32 into the first four bytes of `buf`
    fn encode_u32(&self, buf: &mut [u8], value: u32);

    /// Encode a u64 into the first eight bytes of `buf`
    fn encode_u64(&self, buf: &mut [u8], value: u64);
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn order(&self) -> ByteOrder {
        ByteOrder::LittleEndian
    }

    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<LittleEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<LittleEndian>()
    }

    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64> {
        reader.read_u64::<LittleEndian>()
    }

    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64> {
        reader.read_f64::<LittleEndian>()
    }

    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)> {
        let numerator = reader.read_u32::<LittleEndian>()?;
        let denominator = reader.read_u32::<LittleEndian>()?;
        Ok((numerator, denominator))
    }

    fn decode_u16(&self, buf: &[u8]) -> u16 {
        LittleEndian::read_u16(buf)
    }

    fn decode_u32(&self, buf: &[u8]) -> u32 {
        LittleEndian::read_u32(buf)
    }

    fn decode_u64(&self, buf: &[u8]) -> u64 {
        LittleEndian::read_u64(buf)
    }

    fn encode_u16(&self, buf: &mut [u8], value: u16) {
        LittleEndian::write_u16(buf, value)
    }

    fn encode_u32(&self, buf: &mut [u8], value: u32) {
        LittleEndian::write_u32(buf, value)
    }

    fn encode_u64(&self, buf: &mut [u8], value: u64) {
        LittleEndian::write_u64(buf, value)
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn order(&self) -> ByteOrder {
        ByteOrder::BigEndian
    }

    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<BigEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<BigEndian>()
    }

    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64> {
        reader.read_u64::<BigEndian>()
    }

    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64> {
        reader.read_f64::<BigEndian>()
    }

    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)> {
        let numerator = reader.read_u32::<BigEndian>()?;
        let denominator = reader.read_u32::<BigEndian>()?;
        Ok((numerator, denominator))
    }

    fn decode_u16(&self, buf: &[u8]) -> u16 {
        BigEndian::read_u16(buf)
    }

    fn decode_u32(&self, buf: &[u8]) -> u32 {
        BigEndian::read_u32(buf)
    }

    fn decode_u64(&self, buf: &[u8]) -> u64 {
        BigEndian::read_u64(buf)
    }

    fn encode_u16(&self, buf: &mut [u8], value: u16) {
        BigEndian::write_u16(buf, value)
    }

    fn encode_u32(&self, buf: &mut [u8], value: u32) {
        BigEndian::write_u32(buf, value)
    }

    fn encode_u64(&self, buf: &mut [u8], value: u64) {
        BigEndian::write_u64(buf, value)
    }
}
