//! Gadget-stream entry decoder.

use tcd_core::stream::{StreamWord, STREAM_WORD_BYTES};
use thiserror::Error;

/// Longest symbol name reproduced in a listing line.
const MAX_SYMBOL_LEN: usize = 32;

/// Decode failure for a single stream entry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DisasError {
    /// The memory-read capability refused the word at `addr`.
    #[error("stream read failed with status {status} at {addr:#018x}")]
    MemoryRead { status: i32, addr: u64 },
}

/// Host capabilities for decoding one stream entry.
///
/// `resolve_symbol` is optional: a host without code-symbol
/// introspection keeps the always-miss default and listings fall back
/// to bare numeric words throughout.
pub trait DisasInfo {
    /// Read `buf.len()` bytes of stream memory at `addr`.
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), i32>;

    /// Report a failed stream read.
    fn memory_error(&mut self, status: i32, addr: u64);

    /// Emit one finished listing line.
    fn emit(&mut self, line: &str);

    /// Resolve a stream word to a gadget symbol name.
    fn resolve_symbol(&self, _word: StreamWord) -> Option<&str> {
        None
    }
}

/// Decode the stream entry at `addr` and emit a single listing line.
///
/// Emits `"<name> (<16-hex-digit word>)"` when the word resolves to a
/// gadget symbol, the bare 16-hex-digit word otherwise. On a failed
/// read, reports the status and address through `memory_error` and
/// returns the failure without emitting anything. Returns the number
/// of bytes consumed, always one machine word.
///
/// Only gadget words decode meaningfully; immediate operands
/// interleaved in the stream come out as unresolved (or spuriously
/// resolved) words. Sufficient for a human reading a debug listing,
/// not a complete bytecode disassembly.
pub fn print_stream_word(
    addr: u64,
    info: &mut impl DisasInfo,
) -> Result<usize, DisasError> {
    let mut buf = [0u8; STREAM_WORD_BYTES];
    if let Err(status) = info.read_memory(addr, &mut buf) {
        info.memory_error(status, addr);
        return Err(DisasError::MemoryRead { status, addr });
    }
    let word = StreamWord::from_ne_bytes(buf);

    let name: Option<String> = info
        .resolve_symbol(word)
        .map(|n| n.chars().take(MAX_SYMBOL_LEN).collect());
    match name {
        Some(name) => info.emit(&format!("{name} ({word:016x})")),
        None => info.emit(&format!("{word:016x}")),
    }
    Ok(STREAM_WORD_BYTES)
}
