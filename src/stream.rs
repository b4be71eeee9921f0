//! The caller-owned I/O surface threaded through each `inflate()` call.
//!
//! A Rust slice already carries pointer + length together, so `avail_in`/
//! `avail_out` in spec.md's data model fall out of `next_in.len()` /
//! `next_out.len()` rather than being tracked as separate fields; advancing
//! past consumed/produced bytes is just re-slicing. `total_in`/`total_out`/
//! `adler`/`msg`/`data_type` persist across calls exactly as spec.md's
//! Stream describes.

/// Borrows the caller's input and output buffers for the duration of one
/// [`crate::decoder::Decoder::inflate`] call.
pub struct InflateStream<'a> {
    pub next_in: &'a [u8],
    pub next_out: &'a mut [u8],
    pub total_in: u64,
    pub total_out: u64,
    /// Adler-32 of all bytes decoded so far, when the stream is zlib-wrapped.
    pub adler: u32,
    /// Short diagnostic set when the decoder transitions to `Mode::Bad`.
    pub msg: Option<&'static str>,
    /// `bits + (last ? 64 : 0) + (mode == TYPE ? 128 : 0)`, refreshed on
    /// every return from `inflate()`.
    pub data_type: u32,
}

impl<'a> InflateStream<'a> {
    pub fn new(next_in: &'a [u8], next_out: &'a mut [u8]) -> Self {
        Self {
            next_in,
            next_out,
            total_in: 0,
            total_out: 0,
            adler: 1,
            msg: None,
            data_type: 0,
        }
    }

    #[inline(always)]
    pub fn avail_in(&self) -> usize {
        self.next_in.len()
    }

    #[inline(always)]
    pub fn avail_out(&self) -> usize {
        self.next_out.len()
    }
}
