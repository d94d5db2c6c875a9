//! Threaded-code dispatch core — stream model and gadget-chain
//! convention.
//!
//! A translated guest block is a stream of machine words: word 0 names
//! the first gadget, each gadget consumes its own trailing immediates,
//! and the designated exit gadget terminates the chain. This crate
//! defines the stream format, the dispatch roles every gadget runs
//! against, and the transfer/exit protocol; the execution loop lives
//! in `tcd-exec`.

// Stream entries are machine words and listings format them as
// 16-digit hex; narrower hosts would need a different stream format.
#[cfg(not(target_pointer_width = "64"))]
compile_error!("tcd supports 64-bit hosts only");

pub mod ctx;
pub mod gadget;
pub mod stream;

pub use ctx::{DispatchCtx, TempStack, TEMP_BUF_WORDS};
pub use gadget::{exit_tb, nop, Gadget, GadgetTable, Transfer, EXIT_TB};
pub use stream::{Stream, StreamBuilder, StreamCursor, StreamWord, STREAM_WORD_BYTES};
