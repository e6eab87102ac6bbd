use std::io::Cursor;
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

/// Little-endian classic TIFF: 800x600, two inline SHORT bits-per-sample
/// values and one out-of-line LONG array
pub fn create_test_tiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    // Header
    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();      // IFD offset

    // IFD at offset 8, 4 entries -> 2 + 48 + 4 = 54 bytes, array data at 62
    buffer.write_u16::<LittleEndian>(4).unwrap();

    // ImageWidth LONG 800
    buffer.write_u16::<LittleEndian>(256).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();
    buffer.write_u32::<LittleEndian>(1).unwrap();
    buffer.write_u32::<LittleEndian>(800).unwrap();

    // ImageLength SHORT 600
    buffer.write_u16::<LittleEndian>(257).unwrap();
    buffer.write_u16::<LittleEndian>(3).unwrap();
    buffer.write_u32::<LittleEndian>(1).unwrap();
    buffer.write_u16::<LittleEndian>(600).unwrap();
    buffer.write_u16::<LittleEndian>(0).unwrap();

    // BitsPerSample SHORT x2, inline
    buffer.write_u16::<LittleEndian>(258).unwrap();
    buffer.write_u16::<LittleEndian>(3).unwrap();
    buffer.write_u32::<LittleEndian>(2).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();
    buffer.write_u16::<LittleEndian>(16).unwrap();

    // StripOffsets LONG x3 at offset 62
    buffer.write_u16::<LittleEndian>(273).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();
    buffer.write_u32::<LittleEndian>(3).unwrap();
    buffer.write_u32::<LittleEndian>(62).unwrap();

    // Next IFD offset
    buffer.write_u32::<LittleEndian>(0).unwrap();

    // Array data
    buffer.write_u32::<LittleEndian>(1000).unwrap();
    buffer.write_u32::<LittleEndian>(2000).unwrap();
    buffer.write_u32::<LittleEndian>(3000).unwrap();

    Cursor::new(buffer)
}

/// Big-endian classic TIFF with inline SHORT scalars, which sit in the
/// first two bytes of the value field
pub fn create_big_endian_tiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    buffer.write_u16::<BigEndian>(0x4D4D).unwrap(); // MM
    buffer.write_u16::<BigEndian>(42).unwrap();
    buffer.write_u32::<BigEndian>(8).unwrap();

    buffer.write_u16::<BigEndian>(3).unwrap();

    // ImageWidth SHORT 640
    buffer.write_u16::<BigEndian>(256).unwrap();
    buffer.write_u16::<BigEndian>(3).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u16::<BigEndian>(640).unwrap();
    buffer.write_u16::<BigEndian>(0).unwrap();

    // ImageLength SHORT 480
    buffer.write_u16::<BigEndian>(257).unwrap();
    buffer.write_u16::<BigEndian>(3).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u16::<BigEndian>(480).unwrap();
    buffer.write_u16::<BigEndian>(0).unwrap();

    // SamplesPerPixel SHORT 4
    buffer.write_u16::<BigEndian>(277).unwrap();
    buffer.write_u16::<BigEndian>(3).unwrap();
    buffer.write_u32::<BigEndian>(1).unwrap();
    buffer.write_u16::<BigEndian>(4).unwrap();
    buffer.write_u16::<BigEndian>(0).unwrap();

    buffer.write_u32::<BigEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// Little-endian BigTIFF with two IFDs, the second a reduced-resolution subfile
pub fn create_test_bigtiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    // Header
    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(43).unwrap();
    buffer.write_u16::<LittleEndian>(8).unwrap();      // Offset size
    buffer.write_u16::<LittleEndian>(0).unwrap();      // Reserved
    buffer.write_u64::<LittleEndian>(16).unwrap();     // IFD offset

    // IFD #0 at 16: 8 + 2 * 20 + 8 = 56 bytes -> IFD #1 at 72
    buffer.write_u64::<LittleEndian>(2).unwrap();
    buffer.write_u16::<LittleEndian>(256).unwrap();
    buffer.write_u16::<LittleEndian>(16).unwrap();     // LONG8
    buffer.write_u64::<LittleEndian>(1).unwrap();
    buffer.write_u64::<LittleEndian>(1024).unwrap();
    buffer.write_u16::<LittleEndian>(257).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();      // LONG
    buffer.write_u64::<LittleEndian>(1).unwrap();
    buffer.write_u64::<LittleEndian>(768).unwrap();
    buffer.write_u64::<LittleEndian>(72).unwrap();

    // IFD #1 at 72
    buffer.write_u64::<LittleEndian>(3).unwrap();
    buffer.write_u16::<LittleEndian>(254).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();
    buffer.write_u64::<LittleEndian>(1).unwrap();
    buffer.write_u64::<LittleEndian>(1).unwrap();      // reduced resolution
    buffer.write_u16::<LittleEndian>(256).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();
    buffer.write_u64::<LittleEndian>(1).unwrap();
    buffer.write_u64::<LittleEndian>(512).unwrap();
    buffer.write_u16::<LittleEndian>(257).unwrap();
    buffer.write_u16::<LittleEndian>(4).unwrap();
    buffer.write_u64::<LittleEndian>(1).unwrap();
    buffer.write_u64::<LittleEndian>(384).unwrap();
    buffer.write_u64::<LittleEndian>(0).unwrap();

    Cursor::new(buffer)
}

/// Little-endian classic TIFF carrying GeoTIFF tags: pixel scale,
/// tiepoint and a GeoKey directory declaring EPSG:32633
pub fn create_geotiff_buffer() -> Cursor<Vec<u8>> {
    let mut buffer = Vec::new();

    buffer.write_u16::<LittleEndian>(0x4949).unwrap();
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();

    // IFD at 8 with 5 entries: 2 + 60 + 4 = 66 -> data from 74
    // scale at 74 (24 bytes), tiepoint at 98 (48 bytes), keys at 146 (32 bytes)
    buffer.write_u16::<LittleEndian>(5).unwrap();

    buffer.write_u16::<LittleEndian>(256).unwrap();
    buffer.write_u16::<LittleEndian>(3).unwrap();
    buffer.write_u32::<LittleEndian>(1).unwrap();
    buffer.write_u32::<LittleEndian>(100).unwrap();

    buffer.write_u16::<LittleEndian>(257).unwrap();
    buffer.write_u16::<LittleEndian>(3).unwrap();
    buffer.write_u32::<LittleEndian>(1).unwrap();
    buffer.write_u32::<LittleEndian>(50).unwrap();

    buffer.write_u16::<LittleEndian>(33550).unwrap();
    buffer.write_u16::<LittleEndian>(12).unwrap();
    buffer.write_u32::<LittleEndian>(3).unwrap();
    buffer.write_u32::<LittleEndian>(74).unwrap();

    buffer.write_u16::<LittleEndian>(33922).unwrap();
    buffer.write_u16::<LittleEndian>(12).unwrap();
    buffer.write_u32::<LittleEndian>(6).unwrap();
    buffer.write_u32::<LittleEndian>(98).unwrap();

    buffer.write_u16::<LittleEndian>(34735).unwrap();
    buffer.write_u16::<LittleEndian>(3).unwrap();
    buffer.write_u32::<LittleEndian>(16).unwrap();
    buffer.write_u32::<LittleEndian>(146).unwrap();

    buffer.write_u32::<LittleEndian>(0).unwrap();

    for v in [30.0f64, 30.0, 0.0] {
        buffer.write_f64::<LittleEndian>(v).unwrap();
    }
    for v in [0.0f64, 0.0, 0.0, 500000.0, 4649776.0, 0.0] {
        buffer.write_f64::<LittleEndian>(v).unwrap();
    }
    for v in [1u16, 1, 0, 3, 1024, 0, 1, 1, 1025, 0, 1, 1, 3072, 0, 1, 32633] {
        buffer.write_u16::<LittleEndian>(v).unwrap();
    }

    Cursor::new(buffer)
}
