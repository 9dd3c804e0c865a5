//! Flat trie builder
//!
//! Encodes a `RuleTrie` depth first into the word layout described in
//! `psl_core::trie`: header, node records (each node's children contiguous),
//! then the interned label pool.

use std::collections::HashMap;

use psl_core::trie::{
    node, pack_info, pack_inline_label, CompiledTrie, HEADER_WORDS, MAX_INLINE_LABEL, NODE_WORDS,
    POOL_SLOT, ROOT_SLOT,
};

use crate::trie::{RuleNode, RuleTrie};

/// Encode `trie` into a compiled buffer.
///
/// The output depends only on the trie contents, so equal rule sets always
/// produce identical buffers.
pub fn build_trie(trie: &RuleTrie) -> CompiledTrie {
    let mut encoder = TrieEncoder::new();
    let root = encoder.allocate(1);
    encoder.store_node(root, trie.root());
    encoder.finish(root)
}

// =============================================================================
// Label Pool
// =============================================================================

struct LabelPool {
    data: Vec<u8>,
    index: HashMap<Vec<u8>, u32>,
}

impl LabelPool {
    fn new() -> Self {
        Self {
            data: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn intern(&mut self, label: &[u8]) -> u32 {
        if let Some(&offset) = self.index.get(label) {
            return offset;
        }
        let offset = self.data.len() as u32;
        self.data.extend_from_slice(label);
        self.index.insert(label.to_vec(), offset);
        offset
    }

    /// Pool bytes packed into little-endian words, zero padded.
    fn into_words(self) -> impl Iterator<Item = u32> {
        let data = self.data;
        (0..data.len().div_ceil(4)).map(move |i| {
            let mut bytes = [0u8; 4];
            let chunk = &data[i * 4..(i * 4 + 4).min(data.len())];
            bytes[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(bytes)
        })
    }
}

// =============================================================================
// Encoder
// =============================================================================

struct TrieEncoder {
    words: Vec<u32>,
    pool: LabelPool,
}

impl TrieEncoder {
    fn new() -> Self {
        Self {
            words: vec![0; HEADER_WORDS],
            pool: LabelPool::new(),
        }
    }

    /// Reserve `count` consecutive node records, returning the first word index.
    fn allocate(&mut self, count: usize) -> usize {
        let at = self.words.len();
        self.words.resize(at + count * NODE_WORDS, 0);
        at
    }

    fn store_node(&mut self, at: usize, rule: &RuleNode) {
        self.words[at + node::INFO] =
            pack_info(rule.label.len() as u8, rule.flags, rule.children.len() as u16);
        self.words[at + node::LABEL] = if rule.label.len() <= MAX_INLINE_LABEL {
            pack_inline_label(&rule.label)
        } else {
            self.pool.intern(&rule.label)
        };

        if rule.children.is_empty() {
            return;
        }
        let first = self.allocate(rule.children.len());
        self.words[at + node::CHILDREN] = first as u32;
        for (i, child) in rule.children.iter().enumerate() {
            self.store_node(first + i * NODE_WORDS, child);
        }
    }

    fn finish(mut self, root: usize) -> CompiledTrie {
        self.words[ROOT_SLOT] = root as u32;
        self.words[POOL_SLOT] = (self.words.len() * 4) as u32;
        let mut words = self.words;
        words.extend(self.pool.into_words());
        CompiledTrie::from_words(words)
    }
}
