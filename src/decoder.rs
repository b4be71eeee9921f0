//! The resumable inflate state machine.
//!
//! `Mode` enumerates every state from `original_source/lib/zlib_inflate/inflate.c`'s
//! `zlib_inflate()` switch, and [`Decoder::inflate`] is a direct, idiomatic
//! port of that function's body: the mode transitions, the exact order bits
//! are consumed in, and the diagnostic strings in `stream.msg` all follow it
//! line for line. What changed crossing languages is mechanical — no
//! `goto inf_leave`, so every suspension point is `break 'state_machine`
//! instead, and the by-reference `strm`/`state` pair becomes `&mut self` plus
//! a borrowed [`InflateStream`].

use crate::bitstream::BitAccumulator;
use crate::error::ReturnCode;
use crate::fast::FastOutcome;
use crate::huffman::{self, CodeKind, Entry, CODE_LENGTH_ORDER, ENOUGH};
use crate::stream::InflateStream;
use crate::tables::{self, MAX_WBITS, MIN_WBITS};
use crate::window::Window;
use adler32::RollingAdler32;

/// Maximum combined length of the dynamic-block length tables (286 litlen +
/// 30 distance symbols), with zlib's slack to 320.
const LENS_LEN: usize = 320;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    /// Expecting the two-byte zlib header (CMF/FLG).
    Head,
    /// Expecting the 4-byte preset-dictionary id.
    DictId,
    /// Waiting for the caller to supply the preset dictionary.
    Dict,
    /// Expecting the 3-bit block header (after resuming between blocks).
    Type,
    /// Same as `Type`, but forced past the `FlushMode::Block` suspend point.
    TypeDo,
    /// Copying a stored (uncompressed) block.
    Stored,
    /// Reading the dynamic block's HLIT/HDIST/HCLEN header.
    Table,
    /// Reading the 19 code-length code lengths.
    LenLens,
    /// Reading the literal/length and distance code lengths.
    CodeLens,
    /// Decoding a literal/length/end-of-block symbol.
    Len,
    /// Reading extra length bits.
    LenExt,
    /// Decoding a distance symbol.
    Dist,
    /// Reading extra distance bits.
    DistExt,
    /// Performing one LZ77 back-reference copy.
    Match,
    /// Emitting one literal byte.
    Lit,
    /// Copying the remaining bytes of a stored block. Named `CopyBlock`
    /// rather than zlib's bare `COPY` to avoid colliding with
    /// `core::marker::Copy`.
    CopyBlock,
    /// Verifying the trailing Adler-32 checksum.
    Check,
    /// Reached the end of the stream cleanly.
    Done,
    /// The stream is corrupt; every further call returns `DataError`.
    Bad,
    /// Reserved, unreachable — mirrors zlib's `MEM`.
    Mem,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FlushMode {
    NoFlush,
    /// Return as soon as one block finishes, even with input/output left.
    Block,
    Finish,
    /// `zlib_inflateSyncPacket`'s extension: resynchronize on a stored-block
    /// boundary after the caller ran out of input.
    PacketFlush,
}

/// Resumable RFC 1950/1951 decoder. Everything needed to suspend mid-block
/// and resume later lives here rather than on the call stack.
pub struct Decoder {
    mode: Mode,
    wrap: bool,
    wbits: u32,
    dmax: u32,
    last: bool,
    havedict: bool,

    acc: BitAccumulator,
    check: u32,
    total: u64,

    /// Block-header scratch: `length` doubles as the stored-block byte count
    /// and the remaining match-copy length; `offset` the match distance;
    /// `extra` the number of pending extra bits for whichever of the two is
    /// in flight.
    length: u32,
    offset: u32,
    extra: u32,

    nlen: u32,
    ndist: u32,
    ncode: u32,
    have: u32,
    next: usize,

    lens: [u16; LENS_LEN],
    work: [u16; tables::DEFLATE_NUM_LITLEN_SYMS],

    codes: Vec<Entry>,
    lencode_base: usize,
    lenbits: u32,
    distcode_base: usize,
    distbits: u32,

    window: Window,
}

impl Decoder {
    /// Corresponds to `zlib_inflateInit2`. `wbits` follows the same
    /// convention as `windowBits`: negative means raw DEFLATE (no zlib
    /// wrapper), `8..=15` means zlib-wrapped with that `log2` window size.
    pub fn new(wbits: i32) -> Result<Self, ReturnCode> {
        let (wrap, wbits) = if wbits < 0 {
            (false, (-wbits) as u32)
        } else {
            (true, wbits as u32)
        };
        if !(MIN_WBITS..=MAX_WBITS).contains(&wbits) {
            return Err(ReturnCode::StreamError);
        }

        let mut decoder = Decoder {
            mode: Mode::Head,
            wrap,
            wbits,
            dmax: 32768,
            last: false,
            havedict: false,
            acc: BitAccumulator::new(),
            check: 1,
            total: 0,
            length: 0,
            offset: 0,
            extra: 0,
            nlen: 0,
            ndist: 0,
            ncode: 0,
            have: 0,
            next: 0,
            lens: [0u16; LENS_LEN],
            work: [0u16; tables::DEFLATE_NUM_LITLEN_SYMS],
            codes: vec![Entry::default(); ENOUGH],
            lencode_base: 0,
            lenbits: 0,
            distcode_base: 0,
            distbits: 0,
            window: Window::new(1 << wbits),
        };
        decoder.reset();
        Ok(decoder)
    }

    /// Corresponds to `zlib_inflateReset`. Keeps the window allocation
    /// (reused in place) but forgets everything about the stream so far.
    pub fn reset(&mut self) {
        self.mode = Mode::Head;
        self.last = false;
        self.havedict = false;
        self.dmax = 32768;
        self.acc.init_bits();
        self.check = 1;
        self.total = 0;
        self.length = 0;
        self.offset = 0;
        self.extra = 0;
        self.have = 0;
        self.next = 0;
        self.window.reset(1 << self.wbits);
    }

    /// Supplies the preset dictionary the stream's header demanded. Folds
    /// `dict` into the window and unblocks the next call to `inflate` past
    /// `Mode::Dict`, which otherwise returns `NeedDict` forever.
    pub fn set_dictionary(&mut self, dict: &[u8]) {
        self.window.update(dict);
        self.havedict = true;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Corresponds to `zlib_inflate`. Consumes as much of `stream.next_in`
    /// as it can, produces as much of `stream.next_out` as it can, and
    /// returns either because it ran out of one of them, finished a block
    /// under `FlushMode::Block`, reached the end of the stream, or hit
    /// corrupt input.
    pub fn inflate(&mut self, stream: &mut InflateStream, flush: FlushMode) -> ReturnCode {
        if self.mode == Mode::Mem {
            return ReturnCode::MemError;
        }
        if self.mode == Mode::Type {
            self.mode = Mode::TypeDo;
        }

        let input = std::mem::take(&mut stream.next_in);
        let output = std::mem::take(&mut stream.next_out);
        let mut in_pos = 0usize;
        let mut out_pos = 0usize;
        let mut checksummed = 0usize;
        let mut ret = ReturnCode::Ok;

        'state_machine: loop {
            match self.mode {
                Mode::Head => {
                    if !self.wrap {
                        self.mode = Mode::TypeDo;
                        continue;
                    }
                    if !self.acc.need_bits(16, input, &mut in_pos) {
                        break 'state_machine;
                    }
                    let raw = self.acc.hold();
                    if ((raw & 0xff) << 8 | (raw >> 8)) % 31 != 0 {
                        stream.msg = Some("incorrect header check");
                        log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                        self.mode = Mode::Bad;
                    } else if raw & 0xf != 8 {
                        stream.msg = Some("unknown compression method");
                        log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                        self.mode = Mode::Bad;
                    } else {
                        self.acc.drop_bits(4);
                        let len = self.acc.peek_bits(4) + 8;
                        if len > self.wbits {
                            stream.msg = Some("invalid window size");
                            log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                            self.mode = Mode::Bad;
                        } else {
                            self.dmax = 1u32 << len;
                            self.check = 1;
                            stream.adler = 1;
                            self.mode = if self.acc.hold() & 0x200 != 0 {
                                Mode::DictId
                            } else {
                                Mode::Type
                            };
                            self.acc.init_bits();
                        }
                    }
                }

                Mode::DictId => {
                    if !self.acc.need_bits(32, input, &mut in_pos) {
                        break 'state_machine;
                    }
                    let id = self.acc.hold().swap_bytes();
                    self.check = id;
                    stream.adler = id;
                    self.acc.init_bits();
                    self.mode = Mode::Dict;
                }

                Mode::Dict => {
                    if !self.havedict {
                        log::trace!("need a preset dictionary before decoding can continue");
                        stream.next_in = &input[in_pos..];
                        stream.next_out = &mut output[out_pos..];
                        return ReturnCode::NeedDict;
                    }
                    self.check = 1;
                    stream.adler = 1;
                    self.mode = Mode::Type;
                }

                Mode::Type => {
                    if flush == FlushMode::Block {
                        break 'state_machine;
                    }
                    self.mode = Mode::TypeDo;
                }

                Mode::TypeDo => {
                    if self.last {
                        self.acc.byte_align();
                        self.mode = if self.wrap { Mode::Check } else { Mode::Done };
                    } else {
                        if !self.acc.need_bits(3, input, &mut in_pos) {
                            break 'state_machine;
                        }
                        self.last = self.acc.peek_bits(1) != 0;
                        self.acc.drop_bits(1);
                        let btype = self.acc.peek_bits(2);
                        self.acc.drop_bits(2);
                        match btype {
                            0 => self.mode = Mode::Stored,
                            1 => {
                                let ft = tables::fixed_tables();
                                self.codes[..ft.litlen.len()].copy_from_slice(&ft.litlen);
                                self.lencode_base = 0;
                                self.lenbits = ft.litlen_bits;
                                self.codes[ft.litlen.len()..ft.litlen.len() + ft.dist.len()]
                                    .copy_from_slice(&ft.dist);
                                self.distcode_base = ft.litlen.len();
                                self.distbits = ft.dist_bits;
                                self.mode = Mode::Len;
                            }
                            2 => self.mode = Mode::Table,
                            _ => {
                                stream.msg = Some("invalid block type");
                                log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                                self.mode = Mode::Bad;
                            }
                        }
                    }
                }

                Mode::Stored => {
                    self.acc.byte_align();
                    if !self.acc.need_bits(32, input, &mut in_pos) {
                        break 'state_machine;
                    }
                    let raw = self.acc.hold();
                    if (raw & 0xffff) != ((raw >> 16) ^ 0xffff) {
                        stream.msg = Some("invalid stored block lengths");
                        log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                        self.mode = Mode::Bad;
                    } else {
                        self.length = raw & 0xffff;
                        self.acc.init_bits();
                        self.mode = Mode::CopyBlock;
                    }
                }

                Mode::CopyBlock => {
                    if self.length > 0 {
                        let mut copy = self.length as usize;
                        copy = copy.min(input.len() - in_pos);
                        copy = copy.min(output.len() - out_pos);
                        if copy == 0 {
                            break 'state_machine;
                        }
                        output[out_pos..out_pos + copy]
                            .copy_from_slice(&input[in_pos..in_pos + copy]);
                        in_pos += copy;
                        out_pos += copy;
                        self.length -= copy as u32;
                    } else {
                        self.mode = Mode::Type;
                    }
                }

                Mode::Table => {
                    if !self.acc.need_bits(14, input, &mut in_pos) {
                        break 'state_machine;
                    }
                    self.nlen = self.acc.pop_bits(5) + 257;
                    self.ndist = self.acc.pop_bits(5) + 1;
                    self.ncode = self.acc.pop_bits(4) + 4;
                    if self.nlen > 286 || self.ndist > 30 {
                        stream.msg = Some("too many length or distance symbols");
                        log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                        self.mode = Mode::Bad;
                    } else {
                        self.have = 0;
                        self.mode = Mode::LenLens;
                    }
                }

                Mode::LenLens => {
                    while self.have < self.ncode {
                        if !self.acc.need_bits(3, input, &mut in_pos) {
                            break 'state_machine;
                        }
                        let v = self.acc.pop_bits(3) as u16;
                        self.lens[CODE_LENGTH_ORDER[self.have as usize]] = v;
                        self.have += 1;
                    }
                    while self.have < 19 {
                        self.lens[CODE_LENGTH_ORDER[self.have as usize]] = 0;
                        self.have += 1;
                    }

                    self.next = 0;
                    match huffman::build_huffman_table(
                        CodeKind::Codes,
                        &self.lens,
                        19,
                        &mut self.codes,
                        0,
                        tables::PRECODE_ROOT_BITS,
                        &mut self.work[..19],
                    ) {
                        Ok((used, bits)) => {
                            self.lencode_base = 0;
                            self.lenbits = bits;
                            self.next = used;
                            self.have = 0;
                            self.mode = Mode::CodeLens;
                        }
                        Err(_) => {
                            stream.msg = Some("invalid code lengths set");
                            log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                            self.mode = Mode::Bad;
                        }
                    }
                }

                Mode::CodeLens => {
                    while self.have < self.nlen + self.ndist {
                        let table = &self.codes[self.lencode_base..];
                        let (sym, total_bits) = match huffman::locate_symbol(
                            &mut self.acc,
                            input,
                            &mut in_pos,
                            table,
                            self.lenbits,
                        ) {
                            Ok(v) => v,
                            Err(()) => break 'state_machine,
                        };

                        if sym.val < 16 {
                            self.acc.drop_bits(total_bits);
                            self.lens[self.have as usize] = sym.val;
                            self.have += 1;
                            continue;
                        }

                        let extra_bits = match sym.val {
                            16 => 2,
                            17 => 3,
                            _ => 7,
                        };
                        if !self.acc.need_bits(total_bits + extra_bits, input, &mut in_pos) {
                            break 'state_machine;
                        }
                        self.acc.drop_bits(total_bits);

                        let (repeat, fill) = match sym.val {
                            16 => {
                                if self.have == 0 {
                                    stream.msg = Some("invalid bit length repeat");
                                    log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                                    self.mode = Mode::Bad;
                                    break;
                                }
                                let prev = self.lens[self.have as usize - 1];
                                (3 + self.acc.pop_bits(2), prev)
                            }
                            17 => (3 + self.acc.pop_bits(3), 0),
                            _ => (11 + self.acc.pop_bits(7), 0),
                        };
                        if self.have + repeat > self.nlen + self.ndist {
                            stream.msg = Some("invalid bit length repeat");
                            log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                            self.mode = Mode::Bad;
                            break;
                        }
                        for _ in 0..repeat {
                            self.lens[self.have as usize] = fill;
                            self.have += 1;
                        }
                    }

                    if self.mode == Mode::Bad {
                        continue;
                    }

                    self.next = 0;
                    let build_result = huffman::build_huffman_table(
                        CodeKind::Lens,
                        &self.lens,
                        self.nlen as usize,
                        &mut self.codes,
                        0,
                        tables::LITLEN_ROOT_BITS,
                        &mut self.work,
                    );
                    match build_result {
                        Err(_) => {
                            stream.msg = Some("invalid literal/lengths set");
                            log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                            self.mode = Mode::Bad;
                        }
                        Ok((used, bits)) => {
                            self.lencode_base = 0;
                            self.lenbits = bits;
                            self.next = used;

                            let nlen = self.nlen as usize;
                            let ndist = self.ndist as usize;
                            let dist_lens: [u16; 32] = {
                                let mut buf = [0u16; 32];
                                buf[..ndist].copy_from_slice(&self.lens[nlen..nlen + ndist]);
                                buf
                            };
                            match huffman::build_huffman_table(
                                CodeKind::Dists,
                                &dist_lens,
                                ndist,
                                &mut self.codes,
                                self.next,
                                tables::DIST_ROOT_BITS,
                                &mut self.work[..ndist.max(1)],
                            ) {
                                Err(_) => {
                                    stream.msg = Some("invalid distances set");
                                    log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                                    self.mode = Mode::Bad;
                                }
                                Ok((_used2, distbits)) => {
                                    self.distcode_base = self.next;
                                    self.distbits = distbits;
                                    self.mode = Mode::Len;
                                }
                            }
                        }
                    }
                }

                Mode::Len => {
                    if output.len() - out_pos >= crate::fast::FAST_MIN_OUTPUT
                        && input.len() - in_pos >= crate::fast::FAST_MIN_INPUT
                    {
                        match self.inflate_fast(input, &mut in_pos, output, &mut out_pos) {
                            FastOutcome::Continue => {}
                            FastOutcome::EndOfBlock => self.mode = Mode::Type,
                            FastOutcome::Error(msg) => {
                                stream.msg = Some(msg);
                                log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                                self.mode = Mode::Bad;
                            }
                        }
                        continue;
                    }

                    let table = &self.codes[self.lencode_base..];
                    let sym = match huffman::decode_symbol(
                        &mut self.acc,
                        input,
                        &mut in_pos,
                        table,
                        self.lenbits,
                    ) {
                        Ok(e) => e,
                        Err(()) => break 'state_machine,
                    };
                    self.length = sym.val as u32;
                    if sym.op == 0 {
                        self.mode = Mode::Lit;
                    } else if sym.op & 32 != 0 {
                        self.mode = Mode::Type;
                    } else if sym.op & 64 != 0 {
                        stream.msg = Some("invalid literal/length code");
                        log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                        self.mode = Mode::Bad;
                    } else {
                        self.extra = (sym.op & 15) as u32;
                        self.mode = Mode::LenExt;
                    }
                }

                Mode::LenExt => {
                    if self.extra != 0 {
                        if !self.acc.need_bits(self.extra, input, &mut in_pos) {
                            break 'state_machine;
                        }
                        self.length += self.acc.pop_bits(self.extra);
                    }
                    self.mode = Mode::Dist;
                }

                Mode::Dist => {
                    let table = &self.codes[self.distcode_base..];
                    let sym = match huffman::decode_symbol(
                        &mut self.acc,
                        input,
                        &mut in_pos,
                        table,
                        self.distbits,
                    ) {
                        Ok(e) => e,
                        Err(()) => break 'state_machine,
                    };
                    if sym.op & 64 != 0 {
                        stream.msg = Some("invalid distance code");
                        log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                        self.mode = Mode::Bad;
                    } else {
                        self.offset = sym.val as u32;
                        self.extra = (sym.op & 15) as u32;
                        self.mode = Mode::DistExt;
                    }
                }

                Mode::DistExt => {
                    if self.extra != 0 {
                        if !self.acc.need_bits(self.extra, input, &mut in_pos) {
                            break 'state_machine;
                        }
                        self.offset += self.acc.pop_bits(self.extra);
                    }
                    if self.offset as usize > self.window.whave + out_pos {
                        stream.msg = Some("invalid distance too far back");
                        log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                        self.mode = Mode::Bad;
                    } else {
                        self.mode = Mode::Match;
                    }
                }

                Mode::Match => {
                    if out_pos >= output.len() {
                        break 'state_machine;
                    }
                    let n = self.copy_match(output, &mut out_pos, self.offset as usize, self.length as usize);
                    self.length -= n as u32;
                    if self.length == 0 {
                        self.mode = Mode::Len;
                    }
                }

                Mode::Lit => {
                    if out_pos >= output.len() {
                        break 'state_machine;
                    }
                    output[out_pos] = self.length as u8;
                    out_pos += 1;
                    self.mode = Mode::Len;
                }

                Mode::Check => {
                    if self.wrap {
                        if !self.acc.need_bits(32, input, &mut in_pos) {
                            break 'state_machine;
                        }
                        self.apply_checksum(stream, output, &mut checksummed, out_pos);
                        let stored = self.acc.hold().swap_bytes();
                        if stored != self.check {
                            stream.msg = Some("incorrect data check");
                            log::trace!("transitioning to Mode::Bad: {}", stream.msg.unwrap_or(""));
                            self.mode = Mode::Bad;
                            continue;
                        }
                        self.acc.init_bits();
                    }
                    self.mode = Mode::Done;
                }

                Mode::Done => {
                    log::trace!("reached the end of the stream");
                    ret = ReturnCode::StreamEnd;
                    break 'state_machine;
                }

                Mode::Bad => {
                    ret = ReturnCode::DataError;
                    break 'state_machine;
                }

                Mode::Mem => {
                    stream.next_in = &input[in_pos..];
                    stream.next_out = &mut output[out_pos..];
                    return ReturnCode::MemError;
                }
            }
        }

        self.apply_checksum(stream, output, &mut checksummed, out_pos);
        if out_pos > 0 {
            self.window.update(&output[..out_pos]);
        }
        stream.total_in += in_pos as u64;
        stream.total_out += out_pos as u64;
        self.total += out_pos as u64;
        stream.data_type = self.acc.bits_available()
            + if self.last { 64 } else { 0 }
            + if self.mode == Mode::Type { 128 } else { 0 };

        if ret == ReturnCode::Ok && flush == FlushMode::PacketFlush && out_pos != output.len() && in_pos == input.len() {
            ret = self.sync_packet();
        }
        if ret == ReturnCode::Ok && ((in_pos == 0 && out_pos == 0) || flush == FlushMode::Finish) {
            ret = ReturnCode::BufError;
        }

        stream.next_in = &input[in_pos..];
        stream.next_out = &mut output[out_pos..];
        ret
    }

    /// `zlib_inflateSyncPacket`: resynchronizes at a stored-block boundary —
    /// `mode == Stored` means the 3-bit block-type header has been read and
    /// identified the block as stored, but the 32-bit LEN/NLEN header (and
    /// so the payload after it) has not. Anywhere else, including mid-copy
    /// (`Mode::CopyBlock`), is not a boundary.
    fn sync_packet(&mut self) -> ReturnCode {
        if self.mode == Mode::Stored && self.acc.bits_available() == 0 {
            self.mode = Mode::Type;
            ReturnCode::Ok
        } else {
            ReturnCode::DataError
        }
    }

    /// `zlib_inflateIncomp`: folds externally-supplied bytes (e.g. from a
    /// caller replaying an uncompressed chunk) into the window and checksum
    /// without running them through the bit accumulator at all. Only valid
    /// when `mode` is `Head` or `Type`; fails with `DataError` otherwise.
    ///
    /// Bumps `stream.total_out` by `data.len()` alongside `total_in`, the
    /// same `avail_in`-conflates-with-`total_out` quirk `zlib_inflateIncomp`
    /// itself has — preserved for observable-counter compatibility rather
    /// than silently corrected.
    pub fn inflate_incomp(&mut self, stream: &mut InflateStream, data: &[u8]) -> ReturnCode {
        if !matches!(self.mode, Mode::Head | Mode::Type) {
            return ReturnCode::DataError;
        }
        self.window.update(data);
        if self.wrap {
            let mut h = RollingAdler32::from_value(self.check);
            h.update_buffer(data);
            self.check = h.hash();
            stream.adler = self.check;
        }
        stream.total_in += data.len() as u64;
        stream.total_out += data.len() as u64;
        self.total += data.len() as u64;
        ReturnCode::Ok
    }

    /// Releases the decoder. A no-op beyond consuming `self`: there is no
    /// manual resource to free, `Drop` already handles the `Vec`s.
    pub fn end(self) {}

    fn apply_checksum(
        &mut self,
        stream: &mut InflateStream,
        output: &[u8],
        checksummed: &mut usize,
        upto: usize,
    ) {
        if self.wrap && upto > *checksummed {
            let mut h = RollingAdler32::from_value(self.check);
            h.update_buffer(&output[*checksummed..upto]);
            self.check = h.hash();
            stream.adler = self.check;
            *checksummed = upto;
        }
    }

    /// Copies `min(length, avail_out)` bytes of a back-reference starting
    /// `offset` bytes before the current output position, sourcing from
    /// either this call's own output (self-overlapping copies included) or
    /// the sliding window. Returns how many bytes were actually copied.
    pub(crate) fn copy_match(
        &mut self,
        output: &mut [u8],
        out_pos: &mut usize,
        offset: usize,
        length: usize,
    ) -> usize {
        let avail = output.len() - *out_pos;
        let n = length.min(avail);
        for _ in 0..n {
            let byte = if offset > *out_pos {
                self.window.byte_at_distance(offset - *out_pos)
            } else {
                output[*out_pos - offset]
            };
            output[*out_pos] = byte;
            *out_pos += 1;
        }
        n
    }
}

