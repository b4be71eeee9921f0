//! Canonical Huffman decode table construction.
//!
//! spec.md treats `build_huffman_table` as an external black box with a
//! fixed `{op, bits, val}` contract (see spec.md §9, "Sub-table Huffman
//! dispatch"). There is no crate in this pack that builds exactly this
//! table shape, so this module implements the algorithm itself: the
//! classic incremental-count / canonical-code construction used by zlib's
//! `inftrees.c`, which `original_source/lib/zlib_inflate/inflate.c` calls
//! as `zlib_inflate_table` and whose `code { op, bits, val }` triples this
//! module's [`Entry`] mirrors field-for-field.
//!
//! Entry encoding (see spec.md §9):
//! - `op == 0`: literal, `val` is the literal byte (or precode symbol).
//! - `op == 32`: end-of-block marker.
//! - `op == 64`: invalid code.
//! - `op` in `16..=31`: length/distance symbol, `op & 15` extra bits,
//!   `val` is the base length/distance.
//! - `op` in `1..=15`: not a real symbol yet — a sub-table pointer. `val`
//!   is the sub-table's base offset (relative to the table being built)
//!   and `op` is the number of extra index bits the sub-table consumes.

use crate::bitstream::BitAccumulator;
use crate::error::DeflateError;

pub const MAXBITS: u32 = 15;

/// Number of entries `codes[]` must hold to build any valid litlen/dist
/// table pair without reallocation, matching zlib's `ENOUGH_LENS` +
/// `ENOUGH_DISTS`.
pub const ENOUGH_LENCODE: usize = 852;
pub const ENOUGH_DISTCODE: usize = 592;
pub const ENOUGH: usize = ENOUGH_LENCODE + ENOUGH_DISTCODE;

/// `enough 19 7 7` in zlib's own terms: worst case for the 19-symbol
/// code-length alphabet with a 7-bit root.
pub const ENOUGH_PRECODE: usize = 128;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Entry {
    pub op: u8,
    pub bits: u8,
    pub val: u16,
}

impl Entry {
    const INVALID: Entry = Entry { op: 64, bits: 1, val: 0 };

    #[inline(always)]
    pub fn is_subtable_pointer(&self) -> bool {
        self.op != 0 && (self.op & 0xf0) == 0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CodeKind {
    /// The 19-symbol code-length alphabet used to describe the dynamic
    /// litlen/distance code lengths themselves.
    Codes,
    /// The 257-288 literal/length alphabet.
    Lens,
    /// The distance alphabet.
    Dists,
}

#[rustfmt::skip]
const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31,
    35, 43, 51, 59, 67, 83, 99, 115, 131, 163, 195, 227, 258,
];
#[rustfmt::skip]
const LENGTH_EXTRA: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2,
    3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];
#[rustfmt::skip]
pub const DIST_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193,
    257, 385, 513, 769, 1025, 1537, 2049, 3073, 4097, 6145,
    8193, 12289, 16385, 24577,
];
#[rustfmt::skip]
pub const DIST_EXTRA: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6,
    7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13, 13,
];

/// The fixed order in which code-length code lengths are transmitted for a
/// dynamic block header.
#[rustfmt::skip]
pub const CODE_LENGTH_ORDER: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Builds a canonical Huffman decode table for `codes` symbols (lengths
/// given by `lens[..codes]`) into `table[table_base..]`, using `root_bits`
/// root-table index width (which may be reduced if the code is short
/// enough). Returns the number of entries consumed and the root width
/// actually used.
///
/// This is a faithful port of zlib's `inflate_table`/`zlib_inflate_table`.
pub fn build_huffman_table(
    kind: CodeKind,
    lens: &[u16],
    codes: usize,
    table: &mut [Entry],
    table_base: usize,
    root_bits: u32,
    work: &mut [u16],
) -> Result<(usize, u32), DeflateError> {
    let mut count = [0u32; MAXBITS as usize + 1];
    for &len in &lens[..codes] {
        count[len as usize] += 1;
    }

    let mut max = MAXBITS;
    while max >= 1 && count[max as usize] == 0 {
        max -= 1;
    }
    if max == 0 {
        // No symbols at all: make a 2-entry table that always reports an
        // invalid code, so decoding fails cleanly if this table is ever used.
        table[table_base] = Entry::INVALID;
        table[table_base + 1] = Entry::INVALID;
        return Ok((2, 1));
    }

    let mut min = 1;
    while min < max && count[min as usize] == 0 {
        min += 1;
    }

    let mut root = root_bits;
    if root > max {
        root = max;
    }
    if root < min {
        root = min;
    }

    // Over-subscribed / incomplete check.
    let mut left: i32 = 1;
    for len in 1..=MAXBITS {
        left <<= 1;
        left -= count[len as usize] as i32;
        if left < 0 {
            return Err(DeflateError::Data("invalid code -- over-subscribed"));
        }
    }
    if left > 0 && (kind == CodeKind::Codes || max != 1) {
        return Err(DeflateError::Data("invalid code -- incomplete set"));
    }

    // Sort symbols by code length (stable, ascending by length).
    let mut offs = [0u32; MAXBITS as usize + 2];
    for len in 1..MAXBITS {
        offs[len as usize + 1] = offs[len as usize] + count[len as usize];
    }
    for (sym, &len) in lens[..codes].iter().enumerate() {
        if len != 0 {
            let o = &mut offs[len as usize];
            work[*o as usize] = sym as u16;
            *o += 1;
        }
    }

    // match: the symbol value at/above which a LENS/DISTS entry uses the
    // base/extra tables instead of being a literal or the end-of-block code.
    let match_value: i32 = match kind {
        CodeKind::Codes => 20,
        CodeKind::Lens => 257,
        CodeKind::Dists => 0,
    };

    let mut huff: u32 = 0;
    let mut sym: usize = 0;
    let mut len = min;
    let mut drop: u32 = 0;
    let mut curr = root;
    let mut used: usize = 1 << root;
    let mask = used as u32 - 1;
    let mut low: i64 = -1;
    // Offset (within `table[table_base..]`) of the start of the table
    // currently being filled; advances to a fresh sub-table region when a
    // code word grows past `root` bits.
    let mut next: usize = 0;

    let enough = match kind {
        CodeKind::Lens => ENOUGH_LENCODE,
        CodeKind::Dists => ENOUGH_DISTCODE,
        CodeKind::Codes => ENOUGH_PRECODE,
    };
    if used > enough {
        return Err(DeflateError::Data("huffman table overflow"));
    }

    loop {
        let symbol = work[sym] as i32;
        let entry = if symbol + 1 < match_value {
            Entry { op: 0, bits: (len - drop) as u8, val: symbol as u16 }
        } else if symbol >= match_value {
            let idx = (symbol - match_value) as usize;
            match kind {
                CodeKind::Lens => Entry {
                    op: 16 + LENGTH_EXTRA[idx],
                    bits: (len - drop) as u8,
                    val: LENGTH_BASE[idx],
                },
                CodeKind::Dists => Entry {
                    op: 16 + DIST_EXTRA[idx],
                    bits: (len - drop) as u8,
                    val: DIST_BASE[idx],
                },
                CodeKind::Codes => unreachable!("CODES never reaches the base/extra branch"),
            }
        } else {
            Entry { op: 32, bits: (len - drop) as u8, val: 0 }
        };

        // Replicate this entry across every root-table (or sub-table)
        // index whose low bits, after dropping `drop`, match `huff`.
        let incr: u32 = 1 << (len - drop);
        let mut fill: u32 = 1 << curr;
        let region_size = fill;
        loop {
            fill -= incr;
            table[table_base + next + ((huff >> drop) + fill) as usize] = entry;
            if fill == 0 {
                break;
            }
        }

        // Increment `huff` by one, but in bit-reversed order (canonical
        // Huffman codes are consumed MSB of the reversed codeword first).
        let mut incr2: u32 = 1 << (len - 1);
        while huff & incr2 != 0 {
            incr2 >>= 1;
        }
        if incr2 != 0 {
            huff &= incr2 - 1;
            huff += incr2;
        } else {
            huff = 0;
        }

        sym += 1;
        count[len as usize] -= 1;
        if count[len as usize] == 0 {
            if len == max {
                break;
            }
            len = lens[work[sym] as usize];
        }

        if len > root && (huff & mask) as i64 != low {
            if drop == 0 {
                drop = root;
            }
            next += region_size as usize;

            curr = len - drop;
            let mut room: i32 = 1 << curr;
            while curr + drop < max {
                room -= count[(curr + drop) as usize] as i32;
                if room <= 0 {
                    break;
                }
                curr += 1;
                room <<= 1;
            }

            used += 1 << curr;
            if (kind == CodeKind::Lens && used > ENOUGH_LENCODE)
                || (kind == CodeKind::Dists && used > ENOUGH_DISTCODE)
                || (kind == CodeKind::Codes && used > ENOUGH_PRECODE)
            {
                return Err(DeflateError::Data("huffman table overflow"));
            }

            low = (huff & mask) as i64;
            table[table_base + low as usize] = Entry {
                op: curr as u8,
                bits: root as u8,
                val: next as u16,
            };
        }
    }

    if huff != 0 {
        table[table_base + next + (huff >> drop) as usize] = Entry {
            op: 64,
            bits: (len - drop) as u8,
            val: 0,
        };
    }

    Ok((used, root))
}

/// Resolves the root-table entry for the bits currently at the front of the
/// stream, pulling bytes as needed. Corresponds to the first `for(;;)` loop
/// in zlib's symbol-decode macro expansion (the one indexing `lencode`/
/// `distcode` directly).
pub fn find_root_entry(
    acc: &mut BitAccumulator,
    input: &[u8],
    in_pos: &mut usize,
    table: &[Entry],
    root_bits: u32,
) -> Result<Entry, ()> {
    loop {
        let idx = acc.peek_bits(root_bits) as usize;
        let entry = table[idx];
        if entry.bits as u32 <= acc.bits_available() {
            return Ok(entry);
        }
        if !acc.try_pull_byte(input, in_pos) {
            return Err(());
        }
    }
}

/// Resolves a sub-table entry once `last` (a sub-table pointer) has been
/// found, pulling bytes as needed.
pub fn find_subtable_entry(
    acc: &mut BitAccumulator,
    input: &[u8],
    in_pos: &mut usize,
    table: &[Entry],
    last: Entry,
) -> Result<Entry, ()> {
    loop {
        let idx = last.val as usize
            + acc.peek_bits_with_offset(last.bits as u32, last.op as u32) as usize;
        let entry = table[idx];
        if (last.bits as u32 + entry.bits as u32) <= acc.bits_available() {
            return Ok(entry);
        }
        if !acc.try_pull_byte(input, in_pos) {
            return Err(());
        }
    }
}

/// Finds the fully-resolved symbol entry for the bits at the front of the
/// stream, without consuming them yet. Returns the entry and the total
/// number of bits its codeword occupies (root bits plus, for a sub-table
/// hit, the sub-table's own bits). Used directly by the code-length decode
/// in `Mode::CodeLens`, which needs to know the bit cost *before* committing
/// to dropping it alongside any extra repeat-count bits.
pub fn locate_symbol(
    acc: &mut BitAccumulator,
    input: &[u8],
    in_pos: &mut usize,
    table: &[Entry],
    root_bits: u32,
) -> Result<(Entry, u32), ()> {
    let first = find_root_entry(acc, input, in_pos, table, root_bits)?;
    if first.is_subtable_pointer() {
        let resolved = find_subtable_entry(acc, input, in_pos, table, first)?;
        Ok((resolved, first.bits as u32 + resolved.bits as u32))
    } else {
        Ok((first, first.bits as u32))
    }
}

/// `locate_symbol` plus an immediate commit: drops the codeword's bits and
/// returns the resolved entry. What `Mode::Len`/`Mode::Dist` use, since a
/// mode transition always separates this from any further bit consumption.
pub fn decode_symbol(
    acc: &mut BitAccumulator,
    input: &[u8],
    in_pos: &mut usize,
    table: &[Entry],
    root_bits: u32,
) -> Result<Entry, ()> {
    let (entry, total_bits) = locate_symbol(acc, input, in_pos, table, root_bits)?;
    acc.drop_bits(total_bits);
    Ok(entry)
}
