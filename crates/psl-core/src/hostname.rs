//! Hostname staging buffer
//!
//! The matcher never looks at the caller's string. A query first copies the
//! hostname, ASCII-lowercased and truncated, into a fixed byte region laid out
//! like the reserved hostname slots of the trie header. Matching then runs on
//! plain offsets into that region.

use crate::trie::{HOSTNAME_LEN_SLOT, HOSTNAME_REGION_BYTES, HOSTNAME_SLOT, MAX_HOSTNAME_LEN};

/// Reusable region holding the most recently queried hostname.
#[derive(Debug, Clone)]
pub struct HostnameBuffer {
    region: [u8; HOSTNAME_REGION_BYTES],
    /// Argument of the last `stage` call, as given by the caller.
    staged: String,
    valid: bool,
}

impl Default for HostnameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HostnameBuffer {
    pub fn new() -> Self {
        Self {
            region: [0; HOSTNAME_REGION_BYTES],
            staged: String::new(),
            valid: false,
        }
    }

    /// Stage `hostname` and return its effective length.
    ///
    /// Truncation backs off to a character boundary, so the staged bytes are
    /// always a prefix of `hostname`. Staging the same argument twice in a row
    /// is a no-op.
    pub fn stage(&mut self, hostname: &str) -> usize {
        if self.valid && self.staged == hostname {
            return self.len();
        }

        self.staged.clear();
        self.staged.push_str(hostname);
        self.valid = true;

        let mut n = hostname.len().min(MAX_HOSTNAME_LEN);
        while !hostname.is_char_boundary(n) {
            n -= 1;
        }
        let dst = &mut self.region[HOSTNAME_SLOT..HOSTNAME_SLOT + n];
        for (d, s) in dst.iter_mut().zip(hostname.as_bytes()) {
            *d = s.to_ascii_lowercase();
        }
        self.region[HOSTNAME_LEN_SLOT] = n as u8;
        n
    }

    /// Force the next `stage` call to re-stage unconditionally.
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.staged.clear();
        self.region[HOSTNAME_LEN_SLOT] = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.region[HOSTNAME_LEN_SLOT] as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The staged hostname bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.region[HOSTNAME_SLOT..HOSTNAME_SLOT + self.len()]
    }

    /// The whole region, length byte included.
    pub fn region(&self) -> &[u8; HOSTNAME_REGION_BYTES] {
        &self.region
    }
}
