//! Gadget stream — the translated form of one guest block.
//!
//! An ordered sequence of machine words produced by the translator
//! side and consumed by the dispatch entry. Word 0 names the first
//! gadget; each gadget fetches its own trailing immediate words before
//! the word naming its successor; the stream ends at the designated
//! exit gadget.

use crate::gadget::EXIT_TB;

/// One stream entry: an operation tag or an immediate operand.
pub type StreamWord = u64;

/// Size of one stream entry in bytes.
pub const STREAM_WORD_BYTES: usize = std::mem::size_of::<StreamWord>();

/// An immutable gadget stream, ready for execution.
///
/// Read-only for the engine: any number of threads may execute the
/// same stream concurrently as long as each owns its guest state and
/// nobody frees or rewrites the stream while executions are in flight.
/// Quiescing before retranslation is the producer's job.
#[derive(Debug, Clone)]
pub struct Stream {
    words: Vec<StreamWord>,
}

impl Stream {
    /// Wrap an already-assembled word buffer.
    pub fn from_words(words: Vec<StreamWord>) -> Self {
        Self { words }
    }

    pub fn as_words(&self) -> &[StreamWord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// A cursor positioned at word 0.
    pub fn cursor(&self) -> StreamCursor<'_> {
        StreamCursor {
            words: &self.words,
            pos: 0,
        }
    }
}

/// Auto-advancing read position inside a stream.
///
/// `fetch` is the only way the engine reads the stream, so the cursor
/// always sits on the next unconsumed word. Nothing beyond slice
/// indexing is checked: a chain that runs off the end of its stream is
/// a producer bug, not an engine condition.
#[derive(Debug)]
pub struct StreamCursor<'a> {
    words: &'a [StreamWord],
    pos: usize,
}

impl StreamCursor<'_> {
    /// Consume and return the word at the cursor.
    #[inline]
    pub fn fetch(&mut self) -> StreamWord {
        let word = self.words[self.pos];
        self.pos += 1;
        word
    }

    /// Index of the next unconsumed word.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

/// Appends words to assemble a stream, exit gadget last.
///
/// Assembly helper for stream producers and tests; the engine itself
/// never builds streams.
#[derive(Debug, Default)]
pub struct StreamBuilder {
    words: Vec<StreamWord>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Append the word naming a gadget.
    pub fn gadget(&mut self, tag: StreamWord) -> &mut Self {
        self.words.push(tag);
        self
    }

    /// Append an immediate operand for the preceding gadget.
    pub fn imm(&mut self, value: StreamWord) -> &mut Self {
        self.words.push(value);
        self
    }

    /// Terminate with the exit gadget and its exit value.
    pub fn exit(mut self, value: StreamWord) -> Stream {
        self.words.push(EXIT_TB);
        self.words.push(value);
        Stream::from_words(self.words)
    }
}
