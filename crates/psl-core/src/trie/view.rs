//! Bounds-checked view over a flat trie buffer

use std::cmp::Ordering;

use super::format::*;

/// Handle to a node record: the word index of its first word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub u32);

impl NodeRef {
    #[inline]
    fn word(self, field: usize) -> usize {
        (self.0 as usize).saturating_add(field)
    }
}

/// Zero-copy view into a compiled trie.
///
/// Every read is bounds-checked and reads outside the buffer yield zero, so a
/// restored buffer with inconsistent offsets degrades to "no match" instead of
/// panicking.
#[derive(Debug, Clone, Copy)]
pub struct TrieView<'a> {
    words: &'a [u32],
}

impl<'a> TrieView<'a> {
    pub fn new(words: &'a [u32]) -> Self {
        Self { words }
    }

    #[inline]
    pub fn word(&self, index: usize) -> u32 {
        self.words.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub fn byte(&self, index: usize) -> u8 {
        read_byte(self.words, index).unwrap_or(0)
    }

    pub fn words(&self) -> &'a [u32] {
        self.words
    }

    /// Root node of the trie.
    #[inline]
    pub fn root(&self) -> NodeRef {
        NodeRef(self.word(ROOT_SLOT))
    }

    /// Byte offset of the interned label pool.
    #[inline]
    pub fn pool_offset(&self) -> usize {
        self.word(POOL_SLOT) as usize
    }

    #[inline]
    pub fn label_len(&self, node: NodeRef) -> usize {
        info_label_len(self.word(node.word(node::INFO)))
    }

    #[inline]
    pub fn flags(&self, node: NodeRef) -> NodeFlags {
        info_flags(self.word(node.word(node::INFO)))
    }

    #[inline]
    pub fn child_count(&self, node: NodeRef) -> usize {
        info_child_count(self.word(node.word(node::INFO)))
    }

    /// The `i`-th child of `node`. Callers keep `i < child_count(node)`.
    #[inline]
    pub fn child(&self, node: NodeRef, i: usize) -> NodeRef {
        let first = self.word(node.word(node::CHILDREN)) as usize;
        let index = first.saturating_add(i.saturating_mul(NODE_WORDS));
        NodeRef(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Byte offset where the label bytes of `node` start.
    #[inline]
    fn label_offset(&self, node: NodeRef) -> usize {
        let slot = node.word(node::LABEL);
        if self.label_len(node) <= MAX_INLINE_LABEL {
            slot.saturating_mul(4)
        } else {
            self.pool_offset()
                .saturating_add(self.word(slot) as usize)
        }
    }

    /// Copy out the label of `node`.
    pub fn label(&self, node: NodeRef) -> Vec<u8> {
        let offset = self.label_offset(node);
        (0..self.label_len(node))
            .map(|i| self.byte(offset.saturating_add(i)))
            .collect()
    }

    /// Compare `label` against the label of `node` using the trie order:
    /// shorter labels first, then bytewise.
    pub fn compare_label(&self, label: &[u8], node: NodeRef) -> Ordering {
        let len = self.label_len(node);
        match label.len().cmp(&len) {
            Ordering::Equal => {}
            other => return other,
        }
        let offset = self.label_offset(node);
        for (i, &b) in label.iter().enumerate() {
            match b.cmp(&self.byte(offset.saturating_add(i))) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Binary search the children of `node` for an exact label match.
    pub fn find_child(&self, node: NodeRef, label: &[u8]) -> Option<NodeRef> {
        let mut left = 0;
        let mut right = self.child_count(node);
        while left < right {
            let mid = left + (right - left) / 2;
            let candidate = self.child(node, mid);
            match self.compare_label(label, candidate) {
                Ordering::Less => right = mid,
                Ordering::Greater => left = mid + 1,
                Ordering::Equal => return Some(candidate),
            }
        }
        None
    }

    /// The first child of `node` when it is the single-byte `*` label.
    pub fn wildcard_child(&self, node: NodeRef) -> Option<NodeRef> {
        if self.child_count(node) == 0 {
            return None;
        }
        let first = self.child(node, 0);
        if self.label_len(first) == 1 && self.byte(self.label_offset(first)) == WILDCARD {
            Some(first)
        } else {
            None
        }
    }

    /// Number of node records, derived from the layout (records are stored
    /// contiguously between the header and the label pool).
    pub fn node_count(&self) -> usize {
        let records_end = (self.pool_offset() / 4).min(self.words.len());
        records_end.saturating_sub(HEADER_WORDS) / NODE_WORDS
    }

    /// Bytes occupied by the label pool, padding included.
    pub fn pool_bytes(&self) -> usize {
        (self.words.len() * 4).saturating_sub(self.pool_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Root with children "*", "uk", "example" (pooled).
    fn sample_words() -> Vec<u32> {
        let mut words = vec![0u32; HEADER_WORDS];
        let root = words.len();
        words.extend_from_slice(&[pack_info(0, NodeFlags::empty(), 3), 0, (root + 3) as u32]);
        words.extend_from_slice(&[pack_info(1, NodeFlags::SUFFIX, 0), pack_inline_label(b"*"), 0]);
        words.extend_from_slice(&[pack_info(2, NodeFlags::SUFFIX, 0), pack_inline_label(b"uk"), 0]);
        words.extend_from_slice(&[pack_info(7, NodeFlags::SUFFIX, 0), 0, 0]);
        let pool = words.len() * 4;
        words.extend_from_slice(&[
            u32::from_le_bytes(*b"exam"),
            u32::from_le_bytes([b'p', b'l', b'e', 0]),
        ]);
        words[ROOT_SLOT] = root as u32;
        words[POOL_SLOT] = pool as u32;
        words
    }

    #[test]
    fn test_find_child_inline_and_pooled() {
        let words = sample_words();
        let view = TrieView::new(&words);
        let root = view.root();

        let uk = view.find_child(root, b"uk").expect("uk should be found");
        assert_eq!(view.label(uk), b"uk");
        let example = view.find_child(root, b"example").expect("example should be found");
        assert_eq!(view.label(example), b"example");
        assert!(view.find_child(root, b"us").is_none());
        assert!(view.find_child(root, b"examplf").is_none());
    }

    #[test]
    fn test_wildcard_child() {
        let words = sample_words();
        let view = TrieView::new(&words);
        let wildcard = view.wildcard_child(view.root()).expect("wildcard should be first");
        assert_eq!(view.flags(wildcard), NodeFlags::SUFFIX);
        assert!(view.wildcard_child(wildcard).is_none());
    }

    #[test]
    fn test_layout_stats() {
        let words = sample_words();
        let view = TrieView::new(&words);
        assert_eq!(view.node_count(), 4);
        assert_eq!(view.pool_bytes(), 8);
    }

    #[test]
    fn test_out_of_range_reads_are_zero() {
        let words = vec![0u32; 4];
        let view = TrieView::new(&words);
        let bogus = NodeRef(u32::MAX);
        assert_eq!(view.child_count(bogus), 0);
        assert_eq!(view.label_len(bogus), 0);
        assert!(view.find_child(bogus, b"com").is_none());
        assert_eq!(view.node_count(), 0);
    }
}
