//! Return codes and error types for the inflate state machine.
//!
//! The split mirrors zlib/zlib_inflate: stream corruption is reported through
//! [`ReturnCode::DataError`] and latches the decoder in [`crate::decoder::Mode::Bad`],
//! while caller misuse never touches decoder state at all.

use std::fmt;

/// Outcome of a single [`crate::decoder::Decoder::inflate`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReturnCode {
    /// Made progress; call again with more input/output as needed.
    Ok,
    /// Reached the end of the stream (`Mode::Done`).
    StreamEnd,
    /// A preset dictionary is required before decoding can continue.
    NeedDict,
    /// The compressed stream is corrupt. Every subsequent call returns this.
    DataError,
    /// The caller misused the API (null buffers, bad `wbits`, ...).
    StreamError,
    /// The call could not make any forward progress.
    BufError,
    /// Reserved: the decoder never enters this state on its own (`Mode::Mem`).
    MemError,
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReturnCode::Ok => "ok",
            ReturnCode::StreamEnd => "stream end",
            ReturnCode::NeedDict => "need dictionary",
            ReturnCode::DataError => "data error",
            ReturnCode::StreamError => "stream error",
            ReturnCode::BufError => "buffer error",
            ReturnCode::MemError => "memory error",
        };
        f.write_str(s)
    }
}

/// Convenience error type for the one-shot helpers in [`crate::inflate_to_vec`].
///
/// `inflate()` itself never returns this: it keeps returning [`ReturnCode`] so
/// that a caller can observe the DATA_ERROR-latches-forever behaviour (spec
/// property 6) without the ergonomics of `Result` getting in the way.
#[derive(thiserror::Error, Debug)]
pub enum DeflateError {
    #[error("{0}")]
    Data(&'static str),
    #[error("misuse of the decoder API: {0}")]
    Stream(&'static str),
    #[error("a preset dictionary is required")]
    NeedDict,
    #[error("no forward progress was possible")]
    NoProgress,
}
