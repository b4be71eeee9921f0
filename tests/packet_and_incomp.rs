//! `FlushMode::PacketFlush` / `sync_packet` and `inflate_incomp`, neither of
//! which spec.md's main scenarios (S1-S7) exercise.

use streaming_inflate_rs::decoder::{Decoder, FlushMode, Mode};
use streaming_inflate_rs::error::ReturnCode;
use streaming_inflate_rs::stream::InflateStream;

/// Raw DEFLATE: a non-final stored block "Hi" followed by the 3-bit header
/// of a second (final) stored block, with nothing after it.
fn two_stored_blocks_header_only() -> Vec<u8> {
    vec![0x00, 0x02, 0x00, 0xFD, 0xFF, 0x48, 0x69, 0x01]
}

#[test]
fn sync_packet_succeeds_at_a_genuine_stored_block_boundary() {
    let input = two_stored_blocks_header_only();
    let mut decoder = Decoder::new(-15).unwrap();
    let mut out = [0u8; 16];
    let mut stream = InflateStream::new(&input, &mut out);

    let ret = decoder.inflate(&mut stream, FlushMode::PacketFlush);

    assert_eq!(ret, ReturnCode::Ok);
    assert_eq!(decoder.mode(), Mode::Type);
    let produced = out.len() - stream.avail_out();
    assert_eq!(&out[..produced], b"Hi");
}

#[test]
fn sync_packet_fails_mid_copy() {
    // Same stream, but truncated one byte into the first block's payload:
    // the decoder suspends in Mode::CopyBlock, not at a block boundary.
    let input = [0x00, 0x02, 0x00, 0xFD, 0xFF, 0x48];
    let mut decoder = Decoder::new(-15).unwrap();
    let mut out = [0u8; 16];
    let mut stream = InflateStream::new(&input, &mut out);

    let ret = decoder.inflate(&mut stream, FlushMode::PacketFlush);

    assert_eq!(ret, ReturnCode::DataError);
    assert_eq!(decoder.mode(), Mode::CopyBlock);
}

#[test]
fn inflate_incomp_succeeds_in_head_or_type_mode() {
    let mut decoder = Decoder::new(15).unwrap(); // fresh decoder, mode == Head
    let mut empty_out = [0u8; 0];
    let mut stream = InflateStream::new(&[], &mut empty_out);

    let ret = decoder.inflate_incomp(&mut stream, b"preset history");

    assert_eq!(ret, ReturnCode::Ok);
    assert_eq!(stream.total_in, 15);
    // inflate_incomp bumps total_out by avail_in too, matching
    // zlib_inflateIncomp's documented quirk.
    assert_eq!(stream.total_out, 15);
}

#[test]
fn inflate_incomp_fails_outside_head_or_type_mode() {
    let mut decoder = Decoder::new(-15).unwrap();
    {
        // Drive a raw (unwrapped) stream with no input: Mode::Head falls
        // through immediately to Mode::TypeDo, which then suspends wanting
        // the 3-bit block header that isn't there.
        let mut empty_out = [0u8; 0];
        let mut stream = InflateStream::new(&[], &mut empty_out);
        let _ = decoder.inflate(&mut stream, FlushMode::NoFlush);
    }
    assert_eq!(decoder.mode(), Mode::TypeDo);

    let mut empty_out = [0u8; 0];
    let mut stream = InflateStream::new(&[], &mut empty_out);
    let ret = decoder.inflate_incomp(&mut stream, b"data");

    assert_eq!(ret, ReturnCode::DataError);
    assert_eq!(stream.total_in, 0);
    assert_eq!(stream.total_out, 0);
}
