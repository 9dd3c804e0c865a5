//! Public Suffix List Compiler
//!
//! This crate compiles rule lists in the Public Suffix List grammar into the
//! flat trie format of `psl-core`.

pub mod builder;
pub mod compile;
pub mod parser;
pub mod reference;
pub mod trie;

pub use builder::build_trie;
pub use compile::{compile_rules, compile_rules_with, CompileExt, CompileStats};
pub use parser::{parse_rule_line, parse_rule_list, ParsedRule};
#[cfg(feature = "idna")]
pub use parser::to_ascii;
pub use reference::REFERENCE_CHECKS;
pub use trie::{RuleError, RuleNode, RuleTrie};
