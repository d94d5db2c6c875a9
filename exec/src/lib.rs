//! Threaded dispatch engine — runs one translated block to completion.
//!
//! Provides the dispatch entry [`tb_exec`] that binds the dispatch
//! roles and drives a gadget chain, plus the debug-only
//! instrumentation trampoline interposed on every transfer. Each
//! invocation runs synchronously on its calling thread: no internal
//! concurrency, no suspension, no timeout. An infinite chain blocks
//! its thread until a gadget itself exits.

pub mod dispatch;
#[cfg(debug_assertions)]
pub mod trace;

pub use dispatch::{tb_exec, NullTracer, Tracer};
#[cfg(debug_assertions)]
pub use trace::{tb_exec_traced, LogTracer};
