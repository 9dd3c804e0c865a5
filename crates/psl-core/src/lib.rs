//! Public Suffix List Core Library
//!
//! This crate provides the runtime half of the Public Suffix List engine: the
//! flat trie layout, the hostname staging buffer, the suffix matcher and the
//! snapshot codec. Compiling rule text into a trie lives in `psl-compiler`.
//!
//! # Architecture
//!
//! The compiled rule list is a single pointer-free `u32` buffer: a reserved
//! header, fixed-size node records and an interned label pool. Queries stage
//! the hostname into a fixed byte region and then walk the buffer using plain
//! offsets, so the hot path does no allocation besides the returned string.
//!
//! # Modules
//!
//! - `trie`: flat buffer layout constants and the bounds-checked `TrieView`
//! - `hostname`: per-context hostname staging buffer
//! - `matcher`: the label-by-label precedence walk
//! - `snapshot`: versioned snapshot container (JSON and binary file forms)
//! - `list`: the owned `PublicSuffixList` context tying it all together

pub mod hostname;
pub mod list;
pub mod matcher;
pub mod snapshot;
pub mod trie;

// Re-export commonly used types
pub use hostname::HostnameBuffer;
pub use list::{ChangeKind, PublicSuffixList};
pub use matcher::{find_boundary, match_boundary, Boundary};
pub use snapshot::{Snapshot, SnapshotError};
pub use trie::{CompiledTrie, NodeFlags, NodeRef, TrieView};
