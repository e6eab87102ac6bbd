mod test_utils;
mod geo_key_tests;
mod writer_tests;
