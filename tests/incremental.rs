//! Property: feeding the decoder in arbitrary small chunks of input and
//! output produces the same bytes as one large call (spec property 2).

use streaming_inflate_rs::decoder::{Decoder, FlushMode};
use streaming_inflate_rs::error::ReturnCode;
use streaming_inflate_rs::stream::InflateStream;

fn s3_bytes() -> Vec<u8> {
    vec![
        0x78, 0x9C, 0x01, 0x02, 0x00, 0xFD, 0xFF, 0x48, 0x69, 0x00, 0xA7, 0x00, 0xC9,
    ]
}

fn decode_in_chunks(input: &[u8], in_chunk: usize, out_chunk: usize) -> (Vec<u8>, u32) {
    let mut decoder = Decoder::new(15).unwrap();
    let mut collected = Vec::new();
    let mut in_pos = 0usize;
    let mut adler = 0;

    loop {
        let end = (in_pos + in_chunk).min(input.len());
        let chunk = &input[in_pos..end];
        let mut out = vec![0u8; out_chunk];
        let mut stream = InflateStream::new(chunk, &mut out);
        let ret = decoder.inflate(&mut stream, FlushMode::NoFlush);
        let produced = out_chunk - stream.avail_out();
        collected.extend_from_slice(&out[..produced]);
        in_pos += chunk.len() - stream.avail_in();
        adler = stream.adler;

        match ret {
            ReturnCode::StreamEnd => break,
            ReturnCode::Ok => continue,
            ReturnCode::BufError => {
                assert!(in_pos < input.len() || produced > 0, "stuck with no progress");
                continue;
            }
            other => panic!("unexpected {other:?} decoding in chunks of {in_chunk}/{out_chunk}"),
        }
    }

    (collected, adler)
}

#[test]
fn every_chunking_of_s3_agrees() {
    let input = s3_bytes();
    let whole = decode_in_chunks(&input, input.len(), 64);
    assert_eq!(whole.0, b"Hi");

    for in_chunk in 1..=input.len() {
        for out_chunk in 1..=4 {
            let (out, adler) = decode_in_chunks(&input, in_chunk, out_chunk);
            assert_eq!(out, whole.0, "in_chunk={in_chunk} out_chunk={out_chunk}");
            assert_eq!(adler, whole.1, "in_chunk={in_chunk} out_chunk={out_chunk}");
        }
    }
}

#[test]
fn single_byte_output_budget_still_completes() {
    let input = s3_bytes();
    let (out, _) = decode_in_chunks(&input, input.len(), 1);
    assert_eq!(out, b"Hi");
}
