//! Unit tests for the stream disassembler.

use tcd_core::stream::{StreamBuilder, StreamWord, STREAM_WORD_BYTES};
use tcd_disas::{print_stream_word, DisasError, DisasInfo};

use crate::common::demo_table;

/// In-memory stream plus recorded capability calls.
struct BufInfo {
    words: Vec<StreamWord>,
    symbols: Vec<(StreamWord, String)>,
    lines: Vec<String>,
    errors: Vec<(i32, u64)>,
}

impl BufInfo {
    fn new(words: Vec<StreamWord>) -> Self {
        Self {
            words,
            symbols: Vec::new(),
            lines: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn with_symbol(mut self, word: StreamWord, name: &str) -> Self {
        self.symbols.push((word, name.to_owned()));
        self
    }
}

impl DisasInfo for BufInfo {
    fn read_memory(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), i32> {
        let idx = addr as usize / STREAM_WORD_BYTES;
        match self.words.get(idx) {
            Some(word) => {
                buf.copy_from_slice(&word.to_ne_bytes());
                Ok(())
            }
            None => Err(14),
        }
    }

    fn memory_error(&mut self, status: i32, addr: u64) {
        self.errors.push((status, addr));
    }

    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }

    fn resolve_symbol(&self, word: StreamWord) -> Option<&str> {
        self.symbols
            .iter()
            .find(|(w, _)| *w == word)
            .map(|(_, name)| name.as_str())
    }
}

/// Capability set whose reads always fail with a fixed status.
struct FailingInfo {
    status: i32,
    lines: Vec<String>,
    errors: Vec<(i32, u64)>,
}

impl DisasInfo for FailingInfo {
    fn read_memory(&mut self, _addr: u64, _buf: &mut [u8]) -> Result<(), i32> {
        Err(self.status)
    }

    fn memory_error(&mut self, status: i32, addr: u64) {
        self.errors.push((status, addr));
    }

    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}

#[test]
fn resolved_word_prints_name_and_hex() {
    let mut info = BufInfo::new(vec![7]).with_symbol(7, "mov_imm");
    let consumed = print_stream_word(0, &mut info).unwrap();
    assert_eq!(consumed, STREAM_WORD_BYTES);
    assert_eq!(info.lines, vec!["mov_imm (0000000000000007)"]);
}

#[test]
fn unresolved_word_prints_bare_hex() {
    let mut info = BufInfo::new(vec![0xff]);
    print_stream_word(0, &mut info).unwrap();
    assert_eq!(info.lines, vec!["00000000000000ff"]);
}

#[test]
fn hex_field_is_sixteen_digits_wide() {
    let mut info = BufInfo::new(vec![0xdead_beef_cafe_babe]);
    print_stream_word(0, &mut info).unwrap();
    assert_eq!(info.lines, vec!["deadbeefcafebabe"]);
}

#[test]
fn addresses_index_by_machine_word() {
    let mut info = BufInfo::new(vec![1, 2, 3]).with_symbol(3, "exit_tb");
    print_stream_word(2 * STREAM_WORD_BYTES as u64, &mut info).unwrap();
    assert_eq!(info.lines, vec!["exit_tb (0000000000000003)"]);
}

#[test]
fn long_symbol_names_are_truncated() {
    let long = "g".repeat(40);
    let mut info = BufInfo::new(vec![1]).with_symbol(1, &long);
    print_stream_word(0, &mut info).unwrap();
    let expected = format!("{} (0000000000000001)", "g".repeat(32));
    assert_eq!(info.lines, vec![expected]);
}

#[test]
fn default_resolver_always_misses() {
    struct NoSymbols {
        lines: Vec<String>,
    }
    impl DisasInfo for NoSymbols {
        fn read_memory(
            &mut self,
            _addr: u64,
            buf: &mut [u8],
        ) -> Result<(), i32> {
            buf.copy_from_slice(&1u64.to_ne_bytes());
            Ok(())
        }
        fn memory_error(&mut self, _status: i32, _addr: u64) {}
        fn emit(&mut self, line: &str) {
            self.lines.push(line.to_owned());
        }
    }

    let mut info = NoSymbols { lines: Vec::new() };
    print_stream_word(0, &mut info).unwrap();
    assert_eq!(info.lines, vec!["0000000000000001"]);
}

#[test]
fn read_failure_reports_status_and_emits_nothing() {
    let mut info = FailingInfo {
        status: 42,
        lines: Vec::new(),
        errors: Vec::new(),
    };

    let result = print_stream_word(0x10, &mut info);

    assert_eq!(
        result,
        Err(DisasError::MemoryRead {
            status: 42,
            addr: 0x10
        })
    );
    assert_eq!(info.errors, vec![(42, 0x10)]);
    assert!(info.lines.is_empty());
}

#[test]
fn read_past_stream_end_fails() {
    let mut info = BufInfo::new(vec![1, 2]);
    let addr = 2 * STREAM_WORD_BYTES as u64;
    assert!(print_stream_word(addr, &mut info).is_err());
    assert_eq!(info.errors, vec![(14, addr)]);
    assert!(info.lines.is_empty());
}

#[test]
fn gadget_table_backs_the_symbol_capability() {
    let (table, tags) = demo_table();
    let mut b = StreamBuilder::new();
    b.gadget(tags.nop);
    let stream = b.exit(0);

    let mut info = BufInfo::new(stream.as_words().to_vec());
    for (word, name) in [(tags.nop, "nop"), (0, "exit_tb")] {
        assert_eq!(table.resolve(word), Some(name));
        info = info.with_symbol(word, name);
    }

    for idx in 0..stream.len() {
        print_stream_word((idx * STREAM_WORD_BYTES) as u64, &mut info)
            .unwrap();
    }

    // nop, then exit_tb, then the exit value immediate. The immediate
    // happens to equal a live tag here, which is exactly the
    // approximation a stream listing gives.
    assert_eq!(
        info.lines,
        vec![
            "nop (0000000000000001)",
            "exit_tb (0000000000000000)",
            "exit_tb (0000000000000000)",
        ]
    );
}
