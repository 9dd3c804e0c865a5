//! Suffix Matcher
//!
//! Walks the labels of a staged hostname from right to left against a flat
//! trie, applying the Public Suffix List precedence rules:
//!
//! 1. If no rule matches, the prevailing rule is `*`.
//! 2. An exception rule prevails over everything else and loses its leftmost
//!    label.
//! 3. Otherwise the matching rule with the most labels prevails.
//!
//! The walk only reads the trie buffer and the staged bytes. It allocates
//! nothing.

use crate::trie::{NodeFlags, TrieView};

/// Offsets of the public suffix and registrable domain within a hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Start of the public suffix
    pub suffix_start: usize,
    /// Start of the registrable domain (public suffix plus one label)
    pub domain_start: usize,
    /// Length of the matched hostname
    pub len: usize,
}

/// Return the byte offset where the public suffix of `host` begins.
///
/// `host.len()` means no suffix was found.
pub fn match_boundary(trie: TrieView<'_>, host: &[u8]) -> usize {
    let len = host.len();
    let mut node = trie.root();
    let mut cursor = len;
    let mut label_beg = len;

    loop {
        let label_end = label_beg;
        while label_beg > 0 && host[label_beg - 1] != b'.' {
            label_beg -= 1;
        }
        let label = &host[label_beg..label_end];

        if trie.child_count(node) == 0 {
            break;
        }
        let found = match trie.find_child(node, label) {
            Some(found) => found,
            None => match trie.wildcard_child(node) {
                Some(wildcard) => wildcard,
                None => break,
            },
        };
        node = found;

        let flags = trie.flags(node);
        if flags.contains(NodeFlags::EXCEPTION) {
            // The excepted label itself is not part of the suffix.
            return match host[label_beg..].iter().position(|&b| b == b'.') {
                Some(dot) => label_beg + dot + 1,
                None => len,
            };
        }
        if flags.contains(NodeFlags::SUFFIX) {
            cursor = label_beg;
        }

        if label_beg == 0 {
            break;
        }
        label_beg -= 1;
    }

    cursor
}

/// Compute the suffix and domain offsets for a staged hostname.
///
/// Returns `None` for an empty hostname, a hostname with a leading dot, or
/// when no public suffix can be determined.
pub fn find_boundary(trie: TrieView<'_>, host: &[u8]) -> Option<Boundary> {
    let len = host.len();
    if len == 0 || host[0] == b'.' {
        return None;
    }

    let suffix_start = match_boundary(trie, host);
    if suffix_start == len || suffix_start == 0 {
        return None;
    }

    let mut domain_start = suffix_start - 1;
    while domain_start > 0 && host[domain_start - 1] != b'.' {
        domain_start -= 1;
    }

    Some(Boundary {
        suffix_start,
        domain_start,
        len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::*;

    struct Encoder {
        words: Vec<u32>,
    }

    impl Encoder {
        /// Fill the record at `at` and allocate its (leaf) children; labels must be inline.
        fn node(&mut self, at: usize, label: &str, flags: NodeFlags, children: &[(&str, NodeFlags)]) -> usize {
            self.words[at] = pack_info(label.len() as u8, flags, children.len() as u16);
            self.words[at + 1] = pack_inline_label(label.as_bytes());
            if children.is_empty() {
                return 0;
            }
            let first = self.words.len();
            self.words.resize(first + children.len() * NODE_WORDS, 0);
            self.words[at + 2] = first as u32;
            for (i, (label, flags)) in children.iter().enumerate() {
                let child = first + i * NODE_WORDS;
                self.words[child] = pack_info(label.len() as u8, *flags, 0);
                self.words[child + 1] = pack_inline_label(label.as_bytes());
            }
            first
        }
    }

    /// Rules: `*` (implicit), `com`, `*.ck`, `!www.ck`.
    fn sample() -> Vec<u32> {
        let mut enc = Encoder { words: vec![0u32; HEADER_WORDS + NODE_WORDS] };
        let root = HEADER_WORDS;
        let first = enc.node(
            root,
            "",
            NodeFlags::empty(),
            &[("*", NodeFlags::SUFFIX), ("ck", NodeFlags::empty()), ("com", NodeFlags::SUFFIX)],
        );
        let ck = first + NODE_WORDS;
        enc.node(
            ck,
            "ck",
            NodeFlags::empty(),
            &[("*", NodeFlags::SUFFIX), ("www", NodeFlags::SUFFIX | NodeFlags::EXCEPTION)],
        );
        let pool = enc.words.len() * 4;
        enc.words[ROOT_SLOT] = root as u32;
        enc.words[POOL_SLOT] = pool as u32;
        enc.words
    }

    fn boundary_of(words: &[u32], host: &str) -> Option<(String, String)> {
        let host = host.as_bytes();
        find_boundary(TrieView::new(words), host).map(|b| {
            (
                String::from_utf8_lossy(&host[b.suffix_start..]).into_owned(),
                String::from_utf8_lossy(&host[b.domain_start..]).into_owned(),
            )
        })
    }

    #[test]
    fn test_listed_tld() {
        let words = sample();
        assert_eq!(boundary_of(&words, "a.example.com"), Some(("com".into(), "example.com".into())));
        assert_eq!(boundary_of(&words, "com"), None);
    }

    #[test]
    fn test_unlisted_tld_uses_wildcard() {
        let words = sample();
        assert_eq!(boundary_of(&words, "b.example.example"), Some(("example".into(), "example.example".into())));
        assert_eq!(boundary_of(&words, "example"), None);
    }

    #[test]
    fn test_exception_and_wildcard() {
        let words = sample();
        assert_eq!(boundary_of(&words, "www.ck"), Some(("ck".into(), "www.ck".into())));
        assert_eq!(boundary_of(&words, "www.www.ck"), Some(("ck".into(), "www.ck".into())));
        assert_eq!(boundary_of(&words, "b.test.ck"), Some(("test.ck".into(), "b.test.ck".into())));
        assert_eq!(boundary_of(&words, "test.ck"), None);
    }

    #[test]
    fn test_leading_dot_and_empty() {
        let words = sample();
        assert_eq!(boundary_of(&words, ".example.com"), None);
        assert_eq!(boundary_of(&words, ""), None);
    }

    #[test]
    fn test_match_boundary_offsets() {
        let words = sample();
        let view = TrieView::new(&words);
        assert_eq!(match_boundary(view, b"example.com"), 8);
        assert_eq!(match_boundary(view, b"c.ck"), 0);
    }

    #[test]
    fn test_garbage_buffer_does_not_panic() {
        let words: Vec<u32> = (0..200u32).map(|i| i.wrapping_mul(0x9e37_79b9)).collect();
        let view = TrieView::new(&words);
        let _ = find_boundary(view, b"a.b.c.example.com");
        let _ = find_boundary(TrieView::new(&[]), b"example.com");
    }
}
