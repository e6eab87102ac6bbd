//! Handler for PackBits run-length encoded data

use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

/// Longest literal or replicate run a single header byte can describe
const MAX_RUN: usize = 128;

/// PackBits compression handler (compression code 32773)
///
/// Header byte `n` in `0..=127` copies the next `n + 1` bytes literally,
/// `-127..=-1` repeats the next byte `1 - n` times, `-128` is a no-op.
pub struct PackBitsHandler;

impl CompressionHandler for PackBitsHandler {
    fn decompress(&self, data: &[u8], expected_size: usize) -> TiffResult<Vec<u8>> {
        let mut out = Vec::with_capacity(expected_size);
        let mut pos = 0;

        while pos < data.len() && out.len() < expected_size {
            let header = data[pos] as i8;
            pos += 1;

            match header {
                -128 => {},
                0..=127 => {
                    let len = header as usize + 1;
                    let literal = data.get(pos..pos + len)
                        .ok_or_else(|| TiffError::codec(self.name(), "literal run past end of data"))?;
                    out.extend_from_slice(literal);
                    pos += len;
                },
                _ => {
                    let len = (1 - header as isize) as usize;
                    let value = *data.get(pos)
                        .ok_or_else(|| TiffError::codec(self.name(), "replicate run past end of data"))?;
                    out.extend(std::iter::repeat(value).take(len));
                    pos += 1;
                },
            }
        }

        out.truncate(expected_size);
        Ok(out)
    }

    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len() + data.len() / MAX_RUN + 1);
        let mut pos = 0;

        while pos < data.len() {
            let run = data[pos..].iter()
                .take(MAX_RUN)
                .take_while(|&&b| b == data[pos])
                .count();

            if run >= 2 {
                out.push((1 - run as isize) as i8 as u8);
                out.push(data[pos]);
                pos += run;
                continue;
            }

            // literal run up to the next pair of equal bytes
            let start = pos;
            while pos < data.len() && pos - start < MAX_RUN {
                if pos + 1 < data.len() && data[pos] == data[pos + 1] {
                    break;
                }
                pos += 1;
            }
            out.push((pos - start - 1) as u8);
            out.extend_from_slice(&data[start..pos]);
        }

        Ok(out)
    }

    fn name(&self) -> &'static str {
        "PackBits"
    }
}
