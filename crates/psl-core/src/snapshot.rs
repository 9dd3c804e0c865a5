//! Snapshot container for compiled tries
//!
//! A snapshot carries the exact words of a compiled buffer so a trie can be
//! restored without re-parsing the rule text. It is an opaque blob tied to
//! this format version, not an interchange format.

use serde::{Deserialize, Serialize};

use crate::trie::{
    read_u32_le, HEADER_WORDS, NODE_WORDS, SNAPSHOT_FILE_HEADER_SIZE, SNAPSHOT_FILE_MAGIC,
    SNAPSHOT_MAGIC,
};

/// Error type for snapshot decoding and validation.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Invalid magic: {0}")]
    InvalidMagic(u32),
    #[error("Invalid magic bytes")]
    InvalidMagicBytes,
    #[error("Snapshot has no buffer")]
    MissingBuffer,
    #[error("Buffer too short: {0} words")]
    BufferTooShort(usize),
    #[error("Data too short")]
    DataTooShort,
    #[error("Truncated payload: expected {expected} words, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Versioned snapshot of a compiled trie.
///
/// `buffer` is `None` when the snapshot was taken from a list that had
/// nothing compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub magic: u32,
    pub buffer: Option<Vec<u32>>,
}

impl Snapshot {
    pub fn new(words: Vec<u32>) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            buffer: Some(words),
        }
    }

    /// Snapshot of a list with nothing compiled.
    pub fn empty() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            buffer: None,
        }
    }

    /// Check the magic value and minimal size, returning the payload words.
    pub fn validate(&self) -> Result<&[u32], SnapshotError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(SnapshotError::InvalidMagic(self.magic));
        }
        let words = self.buffer.as_deref().ok_or(SnapshotError::MissingBuffer)?;
        if words.len() < HEADER_WORDS + NODE_WORDS {
            return Err(SnapshotError::BufferTooShort(words.len()));
        }
        Ok(words)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as a binary file: magic bytes, u32 word count, then the words.
    /// A word count of zero encodes an empty snapshot.
    pub fn to_bytes(&self) -> Vec<u8> {
        let words = self.buffer.as_deref().unwrap_or(&[]);
        let mut bytes = Vec::with_capacity(SNAPSHOT_FILE_HEADER_SIZE + words.len() * 4);
        bytes.extend_from_slice(&SNAPSHOT_FILE_MAGIC);
        bytes.extend_from_slice(&(words.len() as u32).to_le_bytes());
        for word in words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() < SNAPSHOT_FILE_HEADER_SIZE {
            return Err(SnapshotError::DataTooShort);
        }
        if data[..4] != SNAPSHOT_FILE_MAGIC {
            return Err(SnapshotError::InvalidMagicBytes);
        }

        let expected = read_u32_le(data, 4) as usize;
        let payload = &data[SNAPSHOT_FILE_HEADER_SIZE..];
        if payload.len() % 4 != 0 || payload.len() / 4 != expected {
            return Err(SnapshotError::Truncated {
                expected,
                found: payload.len() / 4,
            });
        }
        if expected == 0 {
            return Ok(Self::empty());
        }

        let words = payload
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(Self::new(words))
    }
}
