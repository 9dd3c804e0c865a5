//! Flat Trie Layout and Views
//!
//! This module provides the binary layout of a compiled rule list and the
//! zero-copy view the matcher walks.

mod format;
mod view;

pub use format::*;
pub use view::*;

/// A compiled rule list: header slots, node records and the label pool in a
/// single word buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTrie {
    words: Vec<u32>,
}

impl CompiledTrie {
    /// Wrap an encoded buffer.
    pub fn from_words(words: Vec<u32>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn view(&self) -> TrieView<'_> {
        TrieView::new(&self.words)
    }

    /// Size of the buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.words.len() * 4
    }

    /// Words the current allocation can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.words.capacity()
    }

    /// Replace the contents in place, keeping the allocation when it is large
    /// enough.
    pub(crate) fn overwrite(&mut self, words: &[u32]) {
        self.words.clear();
        self.words.extend_from_slice(words);
    }
}
