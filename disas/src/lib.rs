//! Stream disassembler framework.
//!
//! Decodes entries of a gadget stream into human-readable listing
//! lines for debug output. A stream is not ordinary machine code, so
//! decoding leans on the gadget symbol capability rather than an
//! instruction decoder: each entry comes out as a resolved gadget name
//! or a bare numeric word.

pub mod stream;

pub use stream::{print_stream_word, DisasError, DisasInfo};
