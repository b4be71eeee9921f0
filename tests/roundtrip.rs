//! Round-trip property (spec property 1) using a minimal hand-rolled
//! stored-block DEFLATE encoder as the "any conforming encoder" source.

use streaming_inflate_rs::{inflate_raw_to_vec, inflate_zlib_to_vec};

/// Encodes `data` as a sequence of RFC 1951 stored (uncompressed) blocks.
fn deflate_stored(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    if data.is_empty() {
        out.push(0b1); // BFINAL=1, BTYPE=00, zero-length final block
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&(!0u16).to_le_bytes());
        return out;
    }

    let mut chunks = data.chunks(0xFFFF).peekable();
    while let Some(chunk) = chunks.next() {
        let is_last = chunks.peek().is_none();
        out.push(if is_last { 0b1 } else { 0b0 });
        let len = chunk.len() as u16;
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(chunk);
    }
    out
}

fn adler32(data: &[u8]) -> u32 {
    const MOD: u32 = 65521;
    let (mut a, mut b) = (1u32, 0u32);
    for &byte in data {
        a = (a + byte as u32) % MOD;
        b = (b + a) % MOD;
    }
    (b << 16) | a
}

fn zlib_wrap(deflate: &[u8], raw: &[u8]) -> Vec<u8> {
    let mut out = vec![0x78, 0x9C];
    out.extend_from_slice(deflate);
    out.extend_from_slice(&adler32(raw).to_be_bytes());
    out
}

#[test]
fn empty_input_round_trips() {
    let raw = b"";
    let wrapped = zlib_wrap(&deflate_stored(raw), raw);
    assert_eq!(inflate_zlib_to_vec(&wrapped).unwrap(), raw);
}

#[test]
fn short_text_round_trips() {
    let raw = b"the quick brown fox jumps over the lazy dog";
    let wrapped = zlib_wrap(&deflate_stored(raw), raw);
    assert_eq!(inflate_zlib_to_vec(&wrapped).unwrap(), raw);

    let bare = deflate_stored(raw);
    assert_eq!(inflate_raw_to_vec(&bare).unwrap(), raw);
}

#[test]
fn multi_block_round_trips() {
    let raw: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    let wrapped = zlib_wrap(&deflate_stored(&raw), &raw);
    assert_eq!(inflate_zlib_to_vec(&wrapped).unwrap(), raw);
}

#[test]
fn corrupt_adler_trailer_is_rejected() {
    let raw = b"checksum me";
    let mut wrapped = zlib_wrap(&deflate_stored(raw), raw);
    let last = wrapped.len() - 1;
    wrapped[last] ^= 0xFF;
    assert!(inflate_zlib_to_vec(&wrapped).is_err());
}
