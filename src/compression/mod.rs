//! Strip and tile codecs
//!
//! Every supported Compression tag value maps to a `CompressionHandler`;
//! `CompressionFactory` picks the handler for a code.

mod handler;
mod deflate;
mod packbits;
mod factory;
mod zstd;

pub use handler::{CompressionHandler, UncompressedHandler};
pub use deflate::AdobeDeflateHandler;
pub use packbits::PackBitsHandler;
pub use factory::CompressionFactory;
pub use zstd::ZstdHandler;

#[cfg(test)]
mod tests;
