//! Byte-to-word packer shared by all regions of one export.

use alloc::vec::Vec;
use heapless::Vec as ByteBuf;
use wt_ir::{HeaderWord, RegionKind};

/// Packed words per line of generated source.
pub const WORDS_PER_LINE: u8 = 8;

/// One element of the packed output, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamItem {
    /// Start of a region
    Section(RegionKind),
    /// Region header, written directly without going through the packer
    Header(u32),
    /// Four packed bytes
    Word(u32),
    /// Line wrap after [`WORDS_PER_LINE`] packed words
    LineBreak,
}

/// Accumulates output bytes into little-endian 32-bit words.
///
/// Region boundaries do not flush the pending bytes: the tail of one
/// region and the head of the next can share a word, and that word lands
/// after the next region's header.
pub struct PackedWordStream {
    pending: ByteBuf<u8, 4>,
    words_on_line: u8,
    items: Vec<StreamItem>,
}

impl PackedWordStream {
    pub fn new() -> Self {
        Self {
            pending: ByteBuf::new(),
            // The first header occupies the first slot of the first line.
            words_on_line: 1,
            items: Vec::new(),
        }
    }

    /// Push one output byte; every fourth byte closes a word.
    pub fn push_byte(&mut self, byte: u8) {
        // pending is flushed as soon as it fills, so there is always room
        let pushed = self.pending.push(byte);
        debug_assert!(pushed.is_ok(), "pending word overflow");
        if self.pending.is_full() {
            self.close_word();
        }
    }

    pub fn push_header(&mut self, header: HeaderWord) {
        self.items.push(StreamItem::Header(header.value()));
    }

    pub fn begin_section(&mut self, kind: RegionKind) {
        self.items.push(StreamItem::Section(kind));
    }

    /// Bytes waiting for a word to fill (0..=3).
    pub fn pending_bytes(&self) -> usize {
        self.pending.len()
    }

    /// Close a trailing partial word, zero-filling its high bytes, and
    /// return everything emitted.
    pub fn finish(mut self) -> PackedOutput {
        if !self.pending.is_empty() {
            self.close_word();
        }
        PackedOutput { items: self.items }
    }

    fn close_word(&mut self) {
        let word = self
            .pending
            .iter()
            .enumerate()
            .fold(0u32, |word, (i, &b)| word | (b as u32) << (8 * i));
        self.pending.clear();
        self.items.push(StreamItem::Word(word));

        self.words_on_line += 1;
        if self.words_on_line >= WORDS_PER_LINE {
            self.items.push(StreamItem::LineBreak);
            self.words_on_line = 0;
        }
    }
}

impl Default for PackedWordStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Finished output of a [`PackedWordStream`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedOutput {
    items: Vec<StreamItem>,
}

impl PackedOutput {
    pub fn items(&self) -> &[StreamItem] {
        &self.items
    }

    /// Header and packed words in array order.
    pub fn words(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().filter_map(|item| match *item {
            StreamItem::Header(w) | StreamItem::Word(w) => Some(w),
            StreamItem::Section(_) | StreamItem::LineBreak => None,
        })
    }

    /// Number of words emitted.
    pub fn len(&self) -> usize {
        self.words().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
