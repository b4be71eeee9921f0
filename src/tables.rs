//! Constant data: fixed Huffman tables and DEFLATE format limits.
//!
//! The fixed tables (RFC 1951 §3.2.6) are built once, lazily, the first
//! time a fixed-Huffman block is seen — matching the teacher's comment on
//! `zlib_fixedtables` ("Fixed Huffman tables (constant data, loaded on
//! demand)" in spec.md's scope note) without paying to build them on every
//! `Decoder::reset`.

use crate::huffman::{build_huffman_table, CodeKind, Entry, ENOUGH_DISTCODE, ENOUGH_LENCODE};
use std::sync::OnceLock;

pub const DEFLATE_MIN_MATCH_LEN: usize = 3;
pub const DEFLATE_MAX_MATCH_LEN: usize = 258;
pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;
pub const DEFLATE_NUM_DIST_SYMS: usize = 30;
pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;

pub const PRECODE_ROOT_BITS: u32 = 7;
pub const LITLEN_ROOT_BITS: u32 = 9;
pub const DIST_ROOT_BITS: u32 = 6;

pub const MAX_WBITS: u32 = 15;
pub const MIN_WBITS: u32 = 8;
pub const MAX_WINDOW_SIZE: usize = 1 << MAX_WBITS;

pub struct FixedTables {
    pub litlen: Vec<Entry>,
    pub litlen_bits: u32,
    pub dist: Vec<Entry>,
    pub dist_bits: u32,
}

static FIXED: OnceLock<FixedTables> = OnceLock::new();

pub fn fixed_tables() -> &'static FixedTables {
    FIXED.get_or_init(|| {
        let mut litlen_lens = [0u16; DEFLATE_NUM_LITLEN_SYMS];
        for (sym, len) in litlen_lens.iter_mut().enumerate() {
            *len = match sym {
                0..=143 => 8,
                144..=255 => 9,
                256..=279 => 7,
                _ => 8,
            };
        }
        let mut work = [0u16; DEFLATE_NUM_LITLEN_SYMS];
        let mut litlen = vec![Entry::default(); ENOUGH_LENCODE];
        let (_, litlen_bits) = build_huffman_table(
            CodeKind::Lens,
            &litlen_lens,
            DEFLATE_NUM_LITLEN_SYMS,
            &mut litlen,
            0,
            LITLEN_ROOT_BITS,
            &mut work,
        )
        .expect("fixed literal/length lengths are always a valid canonical code");

        let dist_lens = [5u16; DEFLATE_NUM_DIST_SYMS];
        let mut dist = vec![Entry::default(); ENOUGH_DISTCODE];
        let (_, dist_bits) = build_huffman_table(
            CodeKind::Dists,
            &dist_lens,
            DEFLATE_NUM_DIST_SYMS,
            &mut dist,
            0,
            DIST_ROOT_BITS,
            &mut work[..DEFLATE_NUM_DIST_SYMS],
        )
        .expect("fixed distance lengths are always a valid canonical code");

        FixedTables { litlen, litlen_bits, dist, dist_bits }
    })
}
