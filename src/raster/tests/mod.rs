mod band_reader_tests;
mod normalize_tests;
