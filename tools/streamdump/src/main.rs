//! tcd-streamdump — gadget stream listing and demo execution.
//!
//! Assembles a small demonstration stream against a demo gadget set,
//! prints one listing line per stream word, executes the stream, and
//! prints the exit value and final guest state.

use std::env;
use std::process;

use tcd_core::ctx::DispatchCtx;
use tcd_core::gadget::{nop, GadgetTable, Transfer};
use tcd_core::stream::{Stream, StreamBuilder, StreamWord, STREAM_WORD_BYTES};
use tcd_disas::{print_stream_word, DisasInfo};
use tcd_exec::tb_exec;
#[cfg(debug_assertions)]
use tcd_exec::{tb_exec_traced, LogTracer};

const USAGE: &str = "\
usage: tcd-streamdump [options]

Options:
  --trace      Run with the dispatch tracer (debug builds only)
  -h, --help   Show this help
";

/// Demo guest: a small general-register bank.
#[derive(Debug, Default)]
struct DemoCpu {
    gpr: [u64; 8],
}

fn mov_imm(ctx: &mut DispatchCtx<'_, DemoCpu>) -> Transfer {
    let rd = ctx.fetch() as usize;
    let value = ctx.fetch();
    ctx.env.gpr[rd] = value;
    Transfer::Chain(ctx.fetch())
}

fn add(ctx: &mut DispatchCtx<'_, DemoCpu>) -> Transfer {
    let rd = ctx.fetch() as usize;
    let rs1 = ctx.fetch() as usize;
    let rs2 = ctx.fetch() as usize;
    ctx.env.gpr[rd] = ctx.env.gpr[rs1].wrapping_add(ctx.env.gpr[rs2]);
    Transfer::Chain(ctx.fetch())
}

fn st_temp(ctx: &mut DispatchCtx<'_, DemoCpu>) -> Transfer {
    let slot = ctx.fetch() as usize;
    let rs = ctx.fetch() as usize;
    ctx.temps.store(slot, ctx.env.gpr[rs]);
    Transfer::Chain(ctx.fetch())
}

fn ld_temp(ctx: &mut DispatchCtx<'_, DemoCpu>) -> Transfer {
    let rd = ctx.fetch() as usize;
    let slot = ctx.fetch() as usize;
    ctx.env.gpr[rd] = ctx.temps.load(slot);
    Transfer::Chain(ctx.fetch())
}

/// Listing capabilities over an in-memory stream, symbols backed by
/// the gadget table.
struct StreamListing<'a> {
    words: &'a [StreamWord],
    table: &'a GadgetTable<DemoCpu>,
}

impl DisasInfo for StreamListing<'_> {
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), i32> {
        let idx = addr as usize / STREAM_WORD_BYTES;
        match self.words.get(idx) {
            Some(word) => {
                buf.copy_from_slice(&word.to_ne_bytes());
                Ok(())
            }
            None => Err(1),
        }
    }

    fn memory_error(&mut self, status: i32, addr: u64) {
        eprintln!("stream read error {status} at {addr:#x}");
    }

    fn emit(&mut self, line: &str) {
        println!("{line}");
    }

    fn resolve_symbol(&self, word: StreamWord) -> Option<&str> {
        self.table.resolve(word)
    }
}

fn demo_table() -> (GadgetTable<DemoCpu>, [StreamWord; 5]) {
    let mut table = GadgetTable::new();
    let tags = [
        table.register("nop", nop),
        table.register("mov_imm", mov_imm),
        table.register("add", add),
        table.register("st_temp", st_temp),
        table.register("ld_temp", ld_temp),
    ];
    (table, tags)
}

fn demo_stream(tags: &[StreamWord; 5]) -> Stream {
    let [nop, mov_imm, add, st_temp, ld_temp] = *tags;
    let mut b = StreamBuilder::new();
    b.gadget(mov_imm).imm(1).imm(5);
    b.gadget(mov_imm).imm(2).imm(7);
    b.gadget(add).imm(0).imm(1).imm(2);
    b.gadget(st_temp).imm(0).imm(0);
    b.gadget(ld_temp).imm(3).imm(0);
    b.gadget(nop);
    b.exit(0)
}

fn execute(
    cpu: &mut DemoCpu,
    table: &GadgetTable<DemoCpu>,
    stream: &Stream,
    trace: bool,
) -> StreamWord {
    #[cfg(debug_assertions)]
    if trace {
        let mut tracer = LogTracer::new();
        return tb_exec_traced(cpu, table, stream, &mut tracer);
    }
    #[cfg(not(debug_assertions))]
    if trace {
        eprintln!("--trace requires a debug build");
        process::exit(1);
    }
    tb_exec(cpu, table, stream)
}

fn main() {
    let mut trace = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--trace" => trace = true,
            "-h" | "--help" => {
                print!("{USAGE}");
                return;
            }
            other => {
                eprintln!("unknown option: {other}");
                print!("{USAGE}");
                process::exit(1);
            }
        }
    }

    if trace {
        tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
            .with_writer(std::io::stderr)
            .init();
    }

    let (table, tags) = demo_table();
    let stream = demo_stream(&tags);

    println!("stream ({} words):", stream.len());
    let mut listing = StreamListing {
        words: stream.as_words(),
        table: &table,
    };
    for idx in 0..stream.len() {
        let addr = (idx * STREAM_WORD_BYTES) as u64;
        print!("  {addr:#06x}  ");
        if print_stream_word(addr, &mut listing).is_err() {
            process::exit(1);
        }
    }

    let mut cpu = DemoCpu::default();
    let exit_value = execute(&mut cpu, &table, &stream, trace);
    println!("exit value: {exit_value:#x}");
    println!("guest: {cpu:?}");
}
