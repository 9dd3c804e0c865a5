//! Public Suffix List context
//!
//! A `PublicSuffixList` owns one compiled trie and one hostname staging
//! buffer. Contexts are independent: several rule-list versions can be served
//! side by side, and `fork` hands out contexts that share an immutable trie
//! while staging hostnames separately.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::hostname::HostnameBuffer;
use crate::matcher::{find_boundary, Boundary};
use crate::snapshot::Snapshot;
use crate::trie::CompiledTrie;

/// What replaced the trie of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Rule text was compiled
    Compiled,
    /// A snapshot was restored
    Restored,
}

type Observer = Box<dyn FnMut(ChangeKind) + Send>;

/// Owned matching context.
pub struct PublicSuffixList {
    trie: Option<Arc<CompiledTrie>>,
    hostname: HostnameBuffer,
    observers: Vec<Observer>,
}

impl Default for PublicSuffixList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PublicSuffixList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicSuffixList")
            .field("words", &self.trie.as_ref().map(|t| t.words().len()))
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PublicSuffixList {
    /// Create a context with nothing compiled. Every query returns `""`
    /// until a trie is installed or restored.
    pub fn new() -> Self {
        Self {
            trie: None,
            hostname: HostnameBuffer::new(),
            observers: Vec::new(),
        }
    }

    /// Install a freshly compiled trie, replacing the current one.
    pub fn install(&mut self, trie: CompiledTrie) {
        debug!("Installing compiled trie ({} bytes)", trie.byte_len());
        self.trie = Some(Arc::new(trie));
        self.hostname.invalidate();
        self.notify(ChangeKind::Compiled);
    }

    pub fn is_compiled(&self) -> bool {
        self.trie.is_some()
    }

    pub fn trie(&self) -> Option<&CompiledTrie> {
        self.trie.as_deref()
    }

    /// Register a callback invoked after every successful compile or restore.
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: FnMut(ChangeKind) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// A new context sharing this trie, with its own staging buffer and no
    /// observers.
    pub fn fork(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            hostname: HostnameBuffer::new(),
            observers: Vec::new(),
        }
    }

    /// Stage `hostname` and locate its suffix boundary.
    pub fn suffix_boundary(&mut self, hostname: &str) -> Option<Boundary> {
        let trie = self.trie.as_deref()?;
        self.hostname.stage(hostname);
        find_boundary(trie.view(), self.hostname.as_bytes())
    }

    /// Public suffix of `hostname`, or `""` when none can be determined.
    pub fn public_suffix(&mut self, hostname: &str) -> String {
        match self.suffix_boundary(hostname) {
            Some(boundary) => self.staged_slice(boundary.suffix_start),
            None => String::new(),
        }
    }

    /// Registrable domain of `hostname`, or `""` when none can be determined.
    pub fn registrable_domain(&mut self, hostname: &str) -> String {
        match self.suffix_boundary(hostname) {
            Some(boundary) => self.staged_slice(boundary.domain_start),
            None => String::new(),
        }
    }

    fn staged_slice(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.hostname.as_bytes()[start..]).into_owned()
    }

    /// Snapshot of the current trie.
    pub fn to_snapshot(&self) -> Snapshot {
        match &self.trie {
            Some(trie) => Snapshot::new(trie.words().to_vec()),
            None => Snapshot::empty(),
        }
    }

    /// Restore a trie from `snapshot`.
    ///
    /// Returns `false` and leaves the current trie untouched when the snapshot
    /// is rejected.
    pub fn restore(&mut self, snapshot: &Snapshot) -> bool {
        let words = match snapshot.validate() {
            Ok(words) => words,
            Err(e) => {
                debug!("Rejected snapshot: {}", e);
                return false;
            }
        };

        let reused = match self.trie.as_mut().and_then(Arc::get_mut) {
            Some(trie) if trie.capacity() >= words.len() => {
                trie.overwrite(words);
                true
            }
            _ => false,
        };
        if !reused {
            self.trie = Some(Arc::new(CompiledTrie::from_words(words.to_vec())));
        }
        debug!("Restored snapshot ({} words, reused allocation: {})", words.len(), reused);

        self.hostname.invalidate();
        self.notify(ChangeKind::Restored);
        true
    }

    fn notify(&mut self, kind: ChangeKind) {
        for observer in &mut self.observers {
            observer(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::trie::*;

    /// Rules: `*` (implicit) and `com`.
    fn tiny_trie() -> CompiledTrie {
        let mut words = vec![0u32; HEADER_WORDS];
        let root = words.len();
        words.extend_from_slice(&[pack_info(0, NodeFlags::empty(), 2), 0, (root + NODE_WORDS) as u32]);
        words.extend_from_slice(&[pack_info(1, NodeFlags::SUFFIX, 0), pack_inline_label(b"*"), 0]);
        words.extend_from_slice(&[pack_info(3, NodeFlags::SUFFIX, 0), pack_inline_label(b"com"), 0]);
        words[ROOT_SLOT] = root as u32;
        words[POOL_SLOT] = (words.len() * 4) as u32;
        CompiledTrie::from_words(words)
    }

    #[test]
    fn test_empty_context_returns_empty() {
        let mut list = PublicSuffixList::new();
        assert!(!list.is_compiled());
        assert_eq!(list.public_suffix("example.com"), "");
        assert_eq!(list.registrable_domain("example.com"), "");
        assert_eq!(list.to_snapshot(), Snapshot::empty());
    }

    #[test]
    fn test_queries() {
        let mut list = PublicSuffixList::new();
        list.install(tiny_trie());
        assert_eq!(list.public_suffix("WwW.Example.COM"), "com");
        assert_eq!(list.registrable_domain("WwW.Example.COM"), "example.com");
        assert_eq!(list.registrable_domain("com"), "");
        assert_eq!(list.public_suffix(".example.com"), "");
    }

    #[test]
    fn test_truncated_results_are_substrings() {
        let mut list = PublicSuffixList::new();
        list.install(tiny_trie());
        let host = format!("{}.xé", "a".repeat(250));

        let suffix = list.public_suffix(&host);
        let domain = list.registrable_domain(&host);
        assert_eq!(suffix, "x");
        assert_eq!(domain, format!("{}.x", "a".repeat(250)));
        assert!(host.contains(&domain));
    }

    #[test]
    fn test_restore_invalid_keeps_state() {
        let mut list = PublicSuffixList::new();
        list.install(tiny_trie());
        let mut bad = list.to_snapshot();
        bad.magic = 7;
        assert!(!list.restore(&bad));
        assert!(!list.restore(&Snapshot::empty()));
        assert_eq!(list.registrable_domain("a.example.com"), "example.com");
    }

    #[test]
    fn test_restore_into_empty_context() {
        let mut source = PublicSuffixList::new();
        source.install(tiny_trie());
        let snapshot = source.to_snapshot();

        let mut target = PublicSuffixList::new();
        assert!(target.restore(&snapshot));
        assert_eq!(target.registrable_domain("a.example.com"), "example.com");
        assert_eq!(target.to_snapshot(), snapshot);
    }

    #[test]
    fn test_restore_reuses_unique_allocation() {
        let mut list = PublicSuffixList::new();
        list.install(tiny_trie());
        let snapshot = list.to_snapshot();
        let before = list.trie().map(|t| t.words().as_ptr());
        assert!(list.restore(&snapshot));
        assert_eq!(list.trie().map(|t| t.words().as_ptr()), before);
    }

    /// Rules: `*` (implicit), `uk`, `co.uk`, `com`, padded past `min_words`.
    fn larger_trie_words(min_words: usize) -> Vec<u32> {
        let mut words = vec![0u32; HEADER_WORDS];
        let root = words.len();
        let first = root + NODE_WORDS;
        let co = first + 3 * NODE_WORDS;
        words.extend_from_slice(&[pack_info(0, NodeFlags::empty(), 3), 0, first as u32]);
        words.extend_from_slice(&[pack_info(1, NodeFlags::SUFFIX, 0), pack_inline_label(b"*"), 0]);
        words.extend_from_slice(&[pack_info(2, NodeFlags::SUFFIX, 1), pack_inline_label(b"uk"), co as u32]);
        words.extend_from_slice(&[pack_info(3, NodeFlags::SUFFIX, 0), pack_inline_label(b"com"), 0]);
        words.extend_from_slice(&[pack_info(2, NodeFlags::SUFFIX, 0), pack_inline_label(b"co"), 0]);
        words[ROOT_SLOT] = root as u32;
        words[POOL_SLOT] = (words.len() * 4) as u32;
        words.resize(min_words + 1, 0);
        words
    }

    #[test]
    fn test_restore_grows_undersized_allocation() {
        let mut small = tiny_trie().words().to_vec();
        small.shrink_to_fit();
        let mut list = PublicSuffixList::new();
        list.install(CompiledTrie::from_words(small));
        assert_eq!(list.registrable_domain("a.b.co.uk"), "co.uk");

        let capacity = list.trie().map(|t| t.capacity()).unwrap_or(0);
        let snapshot = Snapshot::new(larger_trie_words(capacity));
        assert!(list.restore(&snapshot));

        let trie = list.trie().expect("trie after restore");
        assert!(trie.capacity() > capacity);
        assert_eq!(Some(trie.words()), snapshot.buffer.as_deref());
        assert_eq!(list.to_snapshot(), snapshot);
        assert_eq!(list.registrable_domain("a.b.co.uk"), "b.co.uk");
        assert_eq!(list.registrable_domain("a.example.com"), "example.com");
    }

    #[test]
    fn test_restore_does_not_touch_forks() {
        let mut list = PublicSuffixList::new();
        list.install(tiny_trie());
        let mut fork = list.fork();

        let mut empty_words = vec![0u32; HEADER_WORDS + NODE_WORDS];
        empty_words[ROOT_SLOT] = HEADER_WORDS as u32;
        assert!(list.restore(&Snapshot::new(empty_words)));

        assert_eq!(list.registrable_domain("a.example.com"), "");
        assert_eq!(fork.registrable_domain("a.example.com"), "example.com");
    }

    #[test]
    fn test_restore_invalidates_staged_hostname() {
        let mut list = PublicSuffixList::new();
        list.install(tiny_trie());
        assert_eq!(list.public_suffix("example.com"), "com");

        let mut empty_words = vec![0u32; HEADER_WORDS + NODE_WORDS];
        empty_words[ROOT_SLOT] = HEADER_WORDS as u32;
        assert!(list.restore(&Snapshot::new(empty_words)));
        assert_eq!(list.public_suffix("example.com"), "");
    }

    #[test]
    fn test_observers_fire_on_install_and_restore() {
        let mut list = PublicSuffixList::new();
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&kinds);
        list.on_change(move |kind| seen.lock().unwrap().push(kind));

        list.install(tiny_trie());
        let snapshot = list.to_snapshot();
        assert!(list.restore(&snapshot));
        assert!(!list.restore(&Snapshot::empty()));

        assert_eq!(*kinds.lock().unwrap(), vec![ChangeKind::Compiled, ChangeKind::Restored]);
    }

    #[test]
    fn test_fork_is_independent_for_staging() {
        let mut list = PublicSuffixList::new();
        list.install(tiny_trie());
        let mut fork = list.fork();
        assert_eq!(list.registrable_domain("a.example.com"), "example.com");
        assert_eq!(fork.registrable_domain("b.other.com"), "other.com");
        assert_eq!(list.public_suffix("a.example.com"), "com");
    }
}
