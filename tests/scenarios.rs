//! End-to-end scenarios against concrete DEFLATE/zlib byte sequences.

use streaming_inflate_rs::decoder::{Decoder, FlushMode};
use streaming_inflate_rs::error::ReturnCode;
use streaming_inflate_rs::stream::InflateStream;

fn run(input: &[u8], wbits: i32) -> (Vec<u8>, ReturnCode, Option<&'static str>, u32, u64, u64) {
    let mut decoder = Decoder::new(wbits).unwrap();
    let mut out = vec![0u8; 64];
    let mut stream = InflateStream::new(input, &mut out);
    let ret = decoder.inflate(&mut stream, FlushMode::NoFlush);
    let produced = out.len() - stream.avail_out();
    (
        out[..produced].to_vec(),
        ret,
        stream.msg,
        stream.adler,
        stream.total_in,
        stream.total_out,
    )
}

#[test]
fn s1_empty_stored_block() {
    let input = [0x78, 0x9C, 0x01, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x01];
    let (out, ret, _, adler, _, total_out) = run(&input, 15);
    assert_eq!(out, Vec::<u8>::new());
    assert_eq!(ret, ReturnCode::StreamEnd);
    assert_eq!(adler, 0x0000_0001);
    assert_eq!(total_out, 0);
}

#[test]
fn s2_fixed_huffman_single_literal() {
    let input = [0x78, 0x9C, 0x73, 0x04, 0x00, 0x00, 0x42, 0x00, 0x42];
    let (out, ret, _, adler, _, _) = run(&input, 15);
    assert_eq!(out, b"A");
    assert_eq!(ret, ReturnCode::StreamEnd);
    assert_eq!(adler, 0x0042_0042);
}

fn s3_bytes() -> Vec<u8> {
    vec![
        0x78, 0x9C, // zlib header
        0x01, 0x02, 0x00, 0xFD, 0xFF, 0x48, 0x69, // stored block "Hi"
        0x00, 0xA7, 0x00, 0xC9, // Adler-32("Hi") trailer
    ]
}

#[test]
fn s3_stored_block_hi() {
    let input = s3_bytes();
    let (out, ret, _, _, _, _) = run(&input, 15);
    assert_eq!(out, b"Hi");
    assert_eq!(ret, ReturnCode::StreamEnd);
}

#[test]
fn s4_truncation_resumes_one_byte_at_a_time() {
    let input = s3_bytes();
    let mut decoder = Decoder::new(15).unwrap();
    let mut collected = Vec::new();
    let mut in_pos = 0usize;
    let mut final_ret = None;

    while in_pos <= input.len() {
        let chunk = &input[in_pos..(in_pos + 1).min(input.len())];
        let mut out = [0u8; 1];
        let mut stream = InflateStream::new(chunk, &mut out);
        let ret = decoder.inflate(&mut stream, FlushMode::NoFlush);
        let produced = 1 - stream.avail_out();
        collected.extend_from_slice(&out[..produced]);
        in_pos += chunk.len() - stream.avail_in();
        if ret == ReturnCode::StreamEnd {
            final_ret = Some(ret);
            break;
        }
        if chunk.is_empty() {
            break;
        }
    }

    assert_eq!(collected, b"Hi");
    assert_eq!(final_ret, Some(ReturnCode::StreamEnd));
}

#[test]
fn s5_raw_deflate_no_wrap() {
    let input = [0x01, 0x02, 0x00, 0xFD, 0xFF, 0x48, 0x69];
    let (out, ret, _, _, _, _) = run(&input, -15);
    assert_eq!(out, b"Hi");
    assert_eq!(ret, ReturnCode::StreamEnd);
}

#[test]
fn s6_corrupted_stored_length_complement() {
    let mut input = s3_bytes();
    input[3] ^= 0xFF; // flip byte 3 of the stored-length complement
    let (_, ret, msg, _, _, _) = run(&input, 15);
    assert_eq!(ret, ReturnCode::DataError);
    assert_eq!(msg, Some("invalid stored block lengths"));
}

/// S7 (dynamic Huffman, back-reference): a single dynamic-Huffman block
/// encoding one literal `'a'` followed by a length-3/distance-1 match, i.e.
/// "aaaa" run through `Mode::Table`/`CodeLens`, a real litlen/distance
/// table pair, and `Mode::Match`/`copy_match`'s self-overlapping copy. Bytes
/// independently verified against Python's `zlib.decompress(_, -15)`.
#[test]
fn s7_dynamic_huffman_back_reference() {
    let input = [
        0x78, 0x9C, // zlib header
        0x0D, 0xC0, 0x81, 0x00, 0x00, 0x00, 0x00, 0x80, 0x20, 0xD6, 0xFD, 0x25, 0xBA, 0x06,
        0x03, 0xCE, 0x01, 0x85, // Adler-32("aaaa") trailer
    ];
    let (out, ret, _, adler, _, _) = run(&input, 15);
    assert_eq!(out, b"aaaa");
    assert_eq!(ret, ReturnCode::StreamEnd);
    assert_eq!(adler, 0x03CE_0185);
}
