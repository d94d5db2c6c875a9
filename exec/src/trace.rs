//! Instrumentation trampoline — debug builds only.
//!
//! Interposes on every transfer to report the dispatch state, then
//! resumes the chain unchanged. This module does not exist in release
//! builds; the plain [`tb_exec`](crate::tb_exec) path carries no
//! tracing cost in either build.

use tcd_core::ctx::DispatchCtx;
use tcd_core::gadget::GadgetTable;
use tcd_core::stream::{Stream, StreamWord};

use crate::dispatch::{run, Tracer};

/// Execute one translated block with a tracer interposed on every
/// transfer.
///
/// Behaviorally identical to [`tb_exec`](crate::tb_exec) apart from
/// the tracer's own side effects: same guest mutations, same exit
/// value.
pub fn tb_exec_traced<S, T: Tracer<S>>(
    env: &mut S,
    table: &GadgetTable<S>,
    stream: &Stream,
    tracer: &mut T,
) -> StreamWord {
    run(env, table, stream, tracer)
}

/// Tracer that reports each transfer on the log stream.
///
/// One `debug!` line per transfer, `IP: <word index>, next gadget:
/// <name-or-hex>`, with the pending tag resolved through the table and
/// a bare numeric fallback on a miss. The full guest state follows at
/// `trace!` level. Target `tcd::dispatch`.
#[derive(Debug, Default)]
pub struct LogTracer;

impl LogTracer {
    pub fn new() -> Self {
        Self
    }
}

impl<S: std::fmt::Debug> Tracer<S> for LogTracer {
    fn transfer(
        &mut self,
        ctx: &DispatchCtx<'_, S>,
        tag: StreamWord,
        table: &GadgetTable<S>,
    ) {
        // The tag was already consumed, so the word naming the pending
        // gadget sits one behind the cursor.
        let ip = ctx.cursor.pos() - 1;
        match table.resolve(tag) {
            Some(name) => tracing::debug!(
                target: "tcd::dispatch",
                "IP: {ip:#x}, next gadget: {name}"
            ),
            None => tracing::debug!(
                target: "tcd::dispatch",
                "IP: {ip:#x}, next gadget: {tag:016x}"
            ),
        }
        tracing::trace!(target: "tcd::dispatch", "guest: {:?}", ctx.env);
    }
}
