//! Rule Trie Model
//!
//! The mutable tree built while reading a rule list. Each node owns its
//! children, kept sorted by label length and then by bytes, which is the order
//! the flat encoding and the matcher's binary search rely on.

use std::cmp::Ordering;

use psl_core::trie::{NodeFlags, MAX_CHILDREN, MAX_LABEL_LEN, WILDCARD};

/// Order labels the way the flat trie stores them: shorter first, then bytewise.
#[inline]
pub fn compare_labels(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Why a rule could not be added to the trie.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("empty rule")]
    EmptyRule,
    #[error("empty label")]
    EmptyLabel,
    #[error("label of {0} bytes exceeds {} bytes", MAX_LABEL_LEN)]
    LabelTooLong(usize),
    #[error("more than {} children under one label", MAX_CHILDREN)]
    TooManyChildren,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNode {
    pub label: Vec<u8>,
    pub flags: NodeFlags,
    pub children: Vec<RuleNode>,
}

impl RuleNode {
    fn new(label: &[u8]) -> Self {
        Self {
            label: label.to_vec(),
            flags: NodeFlags::empty(),
            children: Vec::new(),
        }
    }

    pub fn is_suffix(&self) -> bool {
        self.flags.contains(NodeFlags::SUFFIX)
    }

    pub fn is_exception(&self) -> bool {
        self.flags.contains(NodeFlags::EXCEPTION)
    }

    /// Look up a direct child by label.
    pub fn child(&self, label: &[u8]) -> Option<&RuleNode> {
        self.children
            .binary_search_by(|c| compare_labels(&c.label, label))
            .ok()
            .map(|i| &self.children[i])
    }

    fn child_or_insert(&mut self, label: &[u8]) -> Result<&mut RuleNode, RuleError> {
        let index = match self.children.binary_search_by(|c| compare_labels(&c.label, label)) {
            Ok(index) => index,
            Err(index) => {
                if self.children.len() >= MAX_CHILDREN {
                    return Err(RuleError::TooManyChildren);
                }
                self.children.insert(index, RuleNode::new(label));
                index
            }
        };
        Ok(&mut self.children[index])
    }

    /// Nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RuleNode::node_count).sum::<usize>()
    }
}

/// Rule tree rooted at an unlabeled node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrie {
    root: RuleNode,
}

impl Default for RuleTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTrie {
    /// A tree holding only the implicit `*` rule, so that an unlisted
    /// top-level label still has a prevailing rule.
    pub fn new() -> Self {
        let mut wildcard = RuleNode::new(&[WILDCARD]);
        wildcard.flags = NodeFlags::SUFFIX;
        Self {
            root: RuleNode {
                label: Vec::new(),
                flags: NodeFlags::empty(),
                children: vec![wildcard],
            },
        }
    }

    pub fn root(&self) -> &RuleNode {
        &self.root
    }

    /// Insert a lowercased rule, rightmost label first.
    pub fn insert(&mut self, rule: &str, exception: bool) -> Result<(), RuleError> {
        if rule.is_empty() {
            return Err(RuleError::EmptyRule);
        }
        for label in rule.split('.') {
            if label.is_empty() {
                return Err(RuleError::EmptyLabel);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(RuleError::LabelTooLong(label.len()));
            }
        }

        let mut node = &mut self.root;
        for label in rule.rsplit('.') {
            node = node.child_or_insert(label.as_bytes())?;
        }

        node.flags |= NodeFlags::SUFFIX;
        if exception {
            node.flags |= NodeFlags::EXCEPTION;
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
