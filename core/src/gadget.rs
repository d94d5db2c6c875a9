//! Gadget-chain convention — transfer rule, exit path, and the table
//! mapping operation tags to handlers.
//!
//! A gadget is one precompiled dispatch fragment. Every non-exit
//! gadget finishes the same way: fetch the stream word naming its
//! successor and hand it back as [`Transfer::Chain`]. The trampoline
//! in the dispatch entry turns that into the next invocation without
//! growing the host stack, so intermediate transfers are O(1) and
//! stack-neutral regardless of chain length. Only the designated exit
//! gadget returns [`Transfer::Exit`], which unwinds to the dispatch
//! entry; that asymmetry is how chain termination is told apart from
//! ordinary chaining.

use crate::ctx::DispatchCtx;
use crate::stream::StreamWord;

/// Control hand-off returned by every gadget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// Tag of the next gadget, just fetched from the stream. This is
    /// the transient next-target role: it exists only between the
    /// fetch and the dispatch of the successor.
    Chain(StreamWord),
    /// Unwind to the dispatch entry with this exit value. Reserved for
    /// the exit gadget.
    Exit(StreamWord),
}

/// One precompiled dispatch fragment.
///
/// Plain function pointers keep tables `Sync` and transfers data-free:
/// a gadget owns no state beyond the context it is handed, and any
/// local it computes dies with it at the hand-off.
pub type Gadget<S> = fn(&mut DispatchCtx<'_, S>) -> Transfer;

/// Tag of the designated exit gadget, fixed at table slot 0.
pub const EXIT_TB: StreamWord = 0;

/// Exit gadget: consume the exit-value immediate and unwind.
pub fn exit_tb<S>(ctx: &mut DispatchCtx<'_, S>) -> Transfer {
    Transfer::Exit(ctx.fetch())
}

/// No-op gadget: the bare chain epilogue.
pub fn nop<S>(ctx: &mut DispatchCtx<'_, S>) -> Transfer {
    Transfer::Chain(ctx.fetch())
}

struct Entry<S> {
    name: &'static str,
    run: Gadget<S>,
}

/// Tag → handler mapping for one gadget set.
///
/// Built once at setup and shared read-only with every execution. The
/// stream producer must emit tags against the same table the engine
/// dispatches with; a stream executed against a different table runs
/// the wrong gadgets, and nothing here can detect that. Changing a
/// table means regenerating every stream emitted against it.
pub struct GadgetTable<S> {
    entries: Vec<Entry<S>>,
}

impl<S> GadgetTable<S> {
    /// New table with [`exit_tb`] pre-registered at [`EXIT_TB`].
    pub fn new() -> Self {
        let mut table = Self {
            entries: Vec::new(),
        };
        table.register("exit_tb", exit_tb);
        table
    }

    /// Register a gadget and return the tag streams name it by.
    pub fn register(&mut self, name: &'static str, run: Gadget<S>) -> StreamWord {
        let tag = self.entries.len() as StreamWord;
        self.entries.push(Entry { name, run });
        tag
    }

    /// Handler for `tag`.
    ///
    /// Tags are trusted, not validated; an out-of-table tag panics on
    /// the index rather than dispatching wild.
    #[inline]
    pub fn gadget(&self, tag: StreamWord) -> Gadget<S> {
        self.entries[tag as usize].run
    }

    /// Resolve a stream word to a gadget name, if it names one.
    ///
    /// Symbol capability behind debug listings. A miss is never an
    /// error; callers fall back to the bare numeric word.
    pub fn resolve(&self, word: StreamWord) -> Option<&'static str> {
        self.entries.get(word as usize).map(|e| e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Default for GadgetTable<S> {
    fn default() -> Self {
        Self::new()
    }
}
