//! The `inflate_fast` fast path (spec.md §4, "Fast path").
//!
//! Runs a tight loop directly over the bit accumulator, the active
//! litlen/distance tables and the output slice while the caller has
//! guaranteed at least 6 input bytes and 258 output bytes of margin — the
//! worst case for one maximal length/distance symbol pair. Falls back to
//! the slow, fully-resumable state machine in `decoder.rs` the moment that
//! margin can no longer be guaranteed.

use crate::decoder::Decoder;
use crate::huffman;

pub(crate) enum FastOutcome {
    /// Margin ran out (or a symbol could not be completed within it);
    /// `mode` is left at `Len`, the slow path picks up from here.
    Continue,
    /// Hit an end-of-block symbol; `mode` should become `Type`.
    EndOfBlock,
    /// Stream corruption; `mode` should become `Bad` with this message.
    Error(&'static str),
}

/// Minimum input bytes needed to guarantee one length/distance symbol pair
/// can be decoded without an input-exhaustion suspension mid-symbol: 15 bits
/// for the litlen code, 5 extra length bits, 15 bits for the distance code,
/// 13 extra distance bits — 48 bits, rounded up to whole bytes.
pub(crate) const FAST_MIN_INPUT: usize = 6;
/// Minimum output bytes needed: one maximal match (258 bytes).
pub(crate) const FAST_MIN_OUTPUT: usize = 258;

impl Decoder {
    pub(crate) fn inflate_fast(
        &mut self,
        input: &[u8],
        in_pos: &mut usize,
        output: &mut [u8],
        out_pos: &mut usize,
    ) -> FastOutcome {
        loop {
            if output.len() - *out_pos < FAST_MIN_OUTPUT || input.len() - *in_pos < FAST_MIN_INPUT
            {
                return FastOutcome::Continue;
            }

            let lentable = &self.codes[self.lencode_base..];
            let sym = match huffman::decode_symbol(
                &mut self.acc,
                input,
                in_pos,
                lentable,
                self.lenbits,
            ) {
                Ok(e) => e,
                Err(()) => return FastOutcome::Continue,
            };

            if sym.op == 0 {
                output[*out_pos] = sym.val as u8;
                *out_pos += 1;
                continue;
            }
            if sym.op & 32 != 0 {
                return FastOutcome::EndOfBlock;
            }
            if sym.op & 64 != 0 {
                return FastOutcome::Error("invalid literal/length code");
            }

            let mut length = sym.val as u32;
            let extra = (sym.op & 15) as u32;
            if extra != 0 {
                if !self.acc.need_bits(extra, input, in_pos) {
                    return FastOutcome::Continue;
                }
                length += self.acc.pop_bits(extra);
            }

            let disttable = &self.codes[self.distcode_base..];
            let dsym = match huffman::decode_symbol(
                &mut self.acc,
                input,
                in_pos,
                disttable,
                self.distbits,
            ) {
                Ok(e) => e,
                Err(()) => return FastOutcome::Continue,
            };
            if dsym.op & 64 != 0 {
                return FastOutcome::Error("invalid distance code");
            }

            let mut offset = dsym.val as u32;
            let dextra = (dsym.op & 15) as u32;
            if dextra != 0 {
                if !self.acc.need_bits(dextra, input, in_pos) {
                    return FastOutcome::Continue;
                }
                offset += self.acc.pop_bits(dextra);
            }

            if offset as usize > self.window.whave + *out_pos {
                return FastOutcome::Error("invalid distance too far back");
            }

            self.copy_match(output, out_pos, offset as usize, length as usize);
        }
    }
}
