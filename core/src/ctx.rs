//! Dispatch roles — the context every gadget runs against.
//!
//! Four roles are reserved for the lifetime of one translated-block
//! execution: the guest architectural state, the interpreter stack,
//! the stream cursor, and a transient next-target value. The first
//! three are the fields of [`DispatchCtx`]; the next-target value
//! travels inside [`Transfer::Chain`](crate::gadget::Transfer) between
//! the fetch and the dispatch of a successor gadget.
//!
//! The shape of this context is a contract shared with the stream
//! producer: gadgets are written against exactly these roles, and
//! nothing outside them survives a gadget hand-off.

use crate::stream::{StreamCursor, StreamWord};

/// Number of scratch words available to a chain.
pub const TEMP_BUF_WORDS: usize = 128;

/// Per-invocation interpreter stack.
///
/// Slot-addressed scratch storage, distinct from the host call stack.
/// Allocated fresh in the dispatch entry's own frame and dropped when
/// the invocation returns; gadgets may read and write any slot freely,
/// but no slot survives into the next invocation.
pub struct TempStack {
    words: [StreamWord; TEMP_BUF_WORDS],
}

impl TempStack {
    pub fn new() -> Self {
        Self {
            words: [0; TEMP_BUF_WORDS],
        }
    }

    #[inline]
    pub fn load(&self, slot: usize) -> StreamWord {
        self.words[slot]
    }

    #[inline]
    pub fn store(&mut self, slot: usize, value: StreamWord) {
        self.words[slot] = value;
    }
}

impl Default for TempStack {
    fn default() -> Self {
        Self::new()
    }
}

/// The reserved dispatch roles, bound for one chain execution.
///
/// `env` is the architectural-state role: a non-owning reference to
/// guest state owned by the surrounding emulation subsystem, mutated
/// by whatever gadgets the stream names. `temps` is the
/// interpreter-stack role. `cursor` is the stream-cursor role and
/// auto-advances as words are consumed.
pub struct DispatchCtx<'a, S> {
    pub env: &'a mut S,
    pub temps: &'a mut TempStack,
    pub cursor: StreamCursor<'a>,
}

impl<'a, S> DispatchCtx<'a, S> {
    /// Bind the dispatch roles.
    pub fn new(
        env: &'a mut S,
        temps: &'a mut TempStack,
        cursor: StreamCursor<'a>,
    ) -> Self {
        // State and stack roles must be distinct storage. Exclusive
        // references already guarantee it for sized guests; checked
        // here in debug builds with the rest of the role configuration.
        debug_assert!(
            std::mem::size_of::<S>() == 0
                || env as *mut S as usize != temps as *mut TempStack as usize
        );
        Self { env, temps, cursor }
    }

    /// Consume the next stream word.
    ///
    /// Gadgets use this both for their immediate operands and for the
    /// word naming their successor.
    #[inline]
    pub fn fetch(&mut self) -> StreamWord {
        self.cursor.fetch()
    }
}
