//! Flat Trie Format Constants
//!
//! All words are `u32`, little-endian when viewed as bytes.

// =============================================================================
// Header
// =============================================================================

/// Words reserved at the start of every buffer (512 bytes).
pub const HEADER_WORDS: usize = 128;

/// Byte offset of the in-buffer hostname region.
///
/// Reserved for an executor that stages hostnames inside the buffer itself.
/// The native engine stages into a separate `HostnameBuffer` with the same
/// layout and leaves this region zeroed.
pub const HOSTNAME_SLOT: usize = 0;

/// Byte offset of the staged hostname length (u8).
pub const HOSTNAME_LEN_SLOT: usize = 255;

/// Size of the hostname region, including the length byte.
pub const HOSTNAME_REGION_BYTES: usize = 256;

/// Word slot holding the word index of the root node.
pub const ROOT_SLOT: usize = 64;

/// Word slot holding the byte offset of the interned label pool.
pub const POOL_SLOT: usize = 65;

// =============================================================================
// Node Records
// =============================================================================

/// Words per node record.
pub const NODE_WORDS: usize = 3;

/// Node record word offsets.
pub mod node {
    /// u8 label length (bits 24..32), u8 flags (bits 16..24), u16 child count
    pub const INFO: usize = 0;
    /// Inline label bytes, or byte offset into the label pool
    pub const LABEL: usize = 1;
    /// Word index of the first child record
    pub const CHILDREN: usize = 2;
}

/// Labels up to this length are packed into the node record.
pub const MAX_INLINE_LABEL: usize = 4;

/// Longest label accepted by the compiler (DNS label limit).
pub const MAX_LABEL_LEN: usize = 63;

/// Most children a single node can carry.
pub const MAX_CHILDREN: usize = u16::MAX as usize;

/// Label of the implicit "prevailing rule" child.
pub const WILDCARD: u8 = b'*';

bitflags::bitflags! {
    /// Per-node rule flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// A rule ends at this node
        const SUFFIX = 1 << 0;
        /// The rule ending here is an exception (`!rule`)
        const EXCEPTION = 1 << 1;
    }
}

// =============================================================================
// Hostnames
// =============================================================================

/// Staged hostnames are truncated to this many bytes (DNS presentation limit).
pub const MAX_HOSTNAME_LEN: usize = 253;

// =============================================================================
// Snapshots
// =============================================================================

/// Magic value carried by every snapshot container.
pub const SNAPSHOT_MAGIC: u32 = 2;

/// Magic bytes of the binary snapshot file: "PSL" + format version.
pub const SNAPSHOT_FILE_MAGIC: [u8; 4] = [0x50, 0x53, 0x4C, 0x02];

/// Binary snapshot file header size (magic + word count).
pub const SNAPSHOT_FILE_HEADER_SIZE: usize = 8;

// =============================================================================
// Helpers
// =============================================================================

/// Pack the info word of a node record.
#[inline]
pub const fn pack_info(label_len: u8, flags: NodeFlags, child_count: u16) -> u32 {
    (label_len as u32) << 24 | (flags.bits() as u32) << 16 | child_count as u32
}

/// Label length stored in an info word.
#[inline]
pub const fn info_label_len(info: u32) -> usize {
    (info >> 24) as usize
}

/// Flags stored in an info word.
#[inline]
pub const fn info_flags(info: u32) -> NodeFlags {
    NodeFlags::from_bits_truncate((info >> 16) as u8)
}

/// Child count stored in an info word.
#[inline]
pub const fn info_child_count(info: u32) -> usize {
    (info & 0xFFFF) as usize
}

/// Pack up to four label bytes into a word, first byte lowest.
#[inline]
pub fn pack_inline_label(label: &[u8]) -> u32 {
    let mut bytes = [0u8; 4];
    let n = label.len().min(MAX_INLINE_LABEL);
    bytes[..n].copy_from_slice(&label[..n]);
    u32::from_le_bytes(bytes)
}

/// Read the byte at `index` of a word buffer viewed as little-endian bytes.
#[inline]
pub fn read_byte(words: &[u32], index: usize) -> Option<u8> {
    let word = *words.get(index >> 2)?;
    Some(word.to_le_bytes()[index & 3])
}

/// Read u32 little-endian.
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_roundtrip_fields() {
        let info = pack_info(5, NodeFlags::SUFFIX | NodeFlags::EXCEPTION, 300);
        assert_eq!(info_label_len(info), 5);
        assert_eq!(info_flags(info), NodeFlags::SUFFIX | NodeFlags::EXCEPTION);
        assert_eq!(info_child_count(info), 300);
    }

    #[test]
    fn test_inline_label_is_little_endian() {
        let word = pack_inline_label(b"uk");
        assert_eq!(word, 0x6B75);
        let words = [0, word];
        assert_eq!(read_byte(&words, 4), Some(b'u'));
        assert_eq!(read_byte(&words, 5), Some(b'k'));
        assert_eq!(read_byte(&words, 6), Some(0));
        assert_eq!(read_byte(&words, 8), None);
    }

    #[test]
    fn test_hostname_region_fits_header() {
        assert!(HOSTNAME_REGION_BYTES <= ROOT_SLOT * 4);
        assert!(MAX_HOSTNAME_LEN < HOSTNAME_LEN_SLOT);
    }
}
