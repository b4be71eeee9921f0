use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use filebuffer::FileBuffer;
use log::{debug, info};
use structopt::StructOpt;

use streaming_inflate_rs::decoder::{Decoder, FlushMode};
use streaming_inflate_rs::error::ReturnCode;
use streaming_inflate_rs::stream::InflateStream;

#[derive(StructOpt)]
struct InflateParams {
    /// Compressed input file.
    input: PathBuf,
    /// Destination for the decompressed bytes. Defaults to `input` with its
    /// extension stripped.
    output: Option<PathBuf>,
    /// Treat the input as raw DEFLATE (RFC 1951) instead of zlib-wrapped
    /// (RFC 1950).
    #[structopt(long)]
    raw: bool,
    /// Only decode, discarding the output. Useful for benchmarking.
    #[structopt(short, long)]
    simulate: bool,
    /// Size of the read/write chunks fed through the decoder, in bytes.
    #[structopt(long, default_value = "262144")]
    chunk_size: usize,
}

fn main() {
    env_logger::init();
    let params: InflateParams = InflateParams::from_args();

    let input = FileBuffer::open(&params.input)
        .unwrap_or_else(|e| panic!("failed to open {:?}: {}", params.input, e));

    let wbits = if params.raw { -15 } else { 15 };
    let mut decoder = Decoder::new(wbits).expect("valid window size");

    let mut writer = if params.simulate {
        None
    } else {
        let out_path = params
            .output
            .clone()
            .unwrap_or_else(|| params.input.with_extension(""));
        Some(BufWriter::new(
            File::create(&out_path).unwrap_or_else(|e| panic!("failed to create {:?}: {}", out_path, e)),
        ))
    };

    let mut in_pos = 0usize;
    let mut out_buf = vec![0u8; params.chunk_size];
    let mut total_out = 0u64;

    loop {
        let in_chunk = &input[in_pos..];
        let mut stream = InflateStream::new(in_chunk, &mut out_buf);
        let ret = decoder.inflate(&mut stream, FlushMode::NoFlush);

        let produced = out_buf.len() - stream.avail_out();
        in_pos = input.len() - stream.avail_in();
        total_out += produced as u64;

        if produced > 0 {
            if let Some(w) = writer.as_mut() {
                w.write_all(&out_buf[..produced]).expect("write failed");
            }
        }
        debug!("consumed {in_pos} bytes, produced {total_out} bytes so far, {ret}");

        match ret {
            ReturnCode::StreamEnd => break,
            ReturnCode::Ok => continue,
            ReturnCode::BufError if produced > 0 || in_pos < input.len() => continue,
            other => panic!("inflate failed: {other} ({:?})", stream.msg),
        }
    }

    if let Some(mut w) = writer {
        w.flush().expect("flush failed");
    }
    info!("decompressed {} bytes from {:?}", total_out, params.input);
}
