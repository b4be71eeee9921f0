//! A streaming, resumable RFC 1950 (zlib) / RFC 1951 (DEFLATE) decompressor.
//!
//! The core type is [`decoder::Decoder`]: unlike a one-shot "decompress this
//! whole buffer" API, it can be handed input and output in arbitrarily small
//! pieces across many calls to [`decoder::Decoder::inflate`] and picks up
//! exactly where it left off, byte-for-bit. [`inflate_zlib_to_vec`] and
//! [`inflate_raw_to_vec`] wrap that state machine for the common case where
//! the whole compressed buffer is already in memory.

pub mod bitstream;
pub mod decoder;
pub mod error;
mod fast;
pub mod huffman;
pub mod stream;
pub mod tables;
pub mod window;

use crate::decoder::{Decoder, FlushMode};
use crate::error::{DeflateError, ReturnCode};
use crate::stream::InflateStream;

pub use crate::decoder::Mode;
pub use crate::error::ReturnCode as Code;

/// Bytes appended to the output buffer whenever a one-shot helper runs out
/// of room, since the decompressed size generally isn't known up front.
const GROWTH_CHUNK: usize = 64 * 1024;

/// Decompresses a complete zlib-wrapped (RFC 1950) buffer in one call.
pub fn inflate_zlib_to_vec(data: &[u8]) -> Result<Vec<u8>, DeflateError> {
    inflate_to_vec(data, tables::MAX_WBITS as i32)
}

/// Decompresses a complete raw DEFLATE (RFC 1951, no zlib wrapper) buffer.
pub fn inflate_raw_to_vec(data: &[u8]) -> Result<Vec<u8>, DeflateError> {
    inflate_to_vec(data, -(tables::MAX_WBITS as i32))
}

fn inflate_to_vec(data: &[u8], wbits: i32) -> Result<Vec<u8>, DeflateError> {
    let mut decoder = Decoder::new(wbits).map_err(|_| DeflateError::Stream("invalid wbits"))?;
    let mut out = vec![0u8; GROWTH_CHUNK.max(data.len())];
    let mut produced = 0usize;
    let mut consumed = 0usize;

    loop {
        let mut stream = InflateStream::new(&data[consumed..], &mut out[produced..]);
        let ret = decoder.inflate(&mut stream, FlushMode::NoFlush);
        consumed = data.len() - stream.avail_in();
        produced = out.len() - stream.avail_out();

        match ret {
            ReturnCode::StreamEnd => {
                out.truncate(produced);
                return Ok(out);
            }
            ReturnCode::Ok => {
                if stream.avail_out() == 0 {
                    out.resize(out.len() + GROWTH_CHUNK, 0);
                } else if stream.avail_in() == 0 {
                    return Err(DeflateError::Data("truncated input"));
                }
            }
            ReturnCode::NeedDict => return Err(DeflateError::NeedDict),
            ReturnCode::DataError => {
                return Err(DeflateError::Data(stream.msg.unwrap_or("corrupt deflate stream")))
            }
            ReturnCode::BufError => {
                if stream.avail_out() == 0 {
                    out.resize(out.len() + GROWTH_CHUNK, 0);
                } else {
                    return Err(DeflateError::NoProgress);
                }
            }
            ReturnCode::StreamError => return Err(DeflateError::Stream("invalid decoder state")),
            ReturnCode::MemError => unreachable!("Decoder::inflate never enters Mode::Mem"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-assembles the smallest possible raw DEFLATE stream: one final
    /// stored (uncompressed) block.
    fn stored_block(payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0b0000_0001]; // BFINAL=1, BTYPE=00 (stored), rest padding
        let len = payload.len() as u16;
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn raw_stored_block_round_trips() {
        let compressed = stored_block(b"hello, deflate");
        let out = inflate_raw_to_vec(&compressed).unwrap();
        assert_eq!(out, b"hello, deflate");
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let mut compressed = stored_block(b"hello, deflate");
        compressed.truncate(compressed.len() - 3);
        assert!(inflate_raw_to_vec(&compressed).is_err());
    }
}
