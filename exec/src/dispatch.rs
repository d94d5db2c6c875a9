//! Dispatch entry and trampoline loop.
//!
//! One invocation executes one translated block: bind the roles, make
//! the initial transfer to the gadget named by word 0, then keep
//! handing control to whichever gadget each [`Transfer::Chain`] names
//! until the exit gadget unwinds. A transfer costs one table load and
//! one indirect call (the handler-table rendition of tail-chained
//! fragments) and stays O(1) and stack-neutral however long the chain
//! runs.
//!
//! The engine trusts its stream completely: no tag, shape, or
//! termination checks. A malformed or stale stream executes the wrong
//! gadgets (or panics on an out-of-table index); it is never detected
//! here. A guest fault raised inside a gadget is the surrounding
//! emulation subsystem's to field; there is no recovery logic in this
//! loop.

use tcd_core::ctx::{DispatchCtx, TempStack};
use tcd_core::gadget::{GadgetTable, Transfer};
use tcd_core::stream::{Stream, StreamWord};

/// Per-transfer instrumentation seam.
///
/// Called immediately before control reaches each gadget, including
/// the first, with a read-only view of the dispatch context, the
/// pending tag, and the table in force for symbol resolution. The
/// shared borrow means a tracer cannot disturb chain state, so tracing
/// is transparent to the final guest state and exit value.
pub trait Tracer<S> {
    fn transfer(
        &mut self,
        ctx: &DispatchCtx<'_, S>,
        tag: StreamWord,
        table: &GadgetTable<S>,
    );
}

/// Production tracer: no instrumentation, compiles to nothing.
pub struct NullTracer;

impl<S> Tracer<S> for NullTracer {
    #[inline(always)]
    fn transfer(
        &mut self,
        _ctx: &DispatchCtx<'_, S>,
        _tag: StreamWord,
        _table: &GadgetTable<S>,
    ) {
    }
}

/// Execute one translated block to completion.
///
/// Returns the exit value staged by the exit gadget's immediate
/// operand; the canonical empty block `[EXIT_TB, 0]` yields 0. The
/// guest state behind `env` is mutated by whatever gadgets the stream
/// names, and the scratch stack lives only for this call.
pub fn tb_exec<S>(
    env: &mut S,
    table: &GadgetTable<S>,
    stream: &Stream,
) -> StreamWord {
    run(env, table, stream, &mut NullTracer)
}

/// Trampoline shared by the plain and instrumented entry points.
#[inline]
pub(crate) fn run<S, T: Tracer<S>>(
    env: &mut S,
    table: &GadgetTable<S>,
    stream: &Stream,
    tracer: &mut T,
) -> StreamWord {
    // Fresh scratch per invocation, released on return.
    let mut temps = TempStack::new();
    let mut ctx = DispatchCtx::new(env, &mut temps, stream.cursor());

    // Word 0 names the first gadget; invoking it stands in for the one
    // true call of the chain.
    let mut tag = ctx.fetch();
    loop {
        tracer.transfer(&ctx, tag, table);
        match (table.gadget(tag))(&mut ctx) {
            Transfer::Chain(next) => tag = next,
            Transfer::Exit(value) => return value,
        }
    }
}
