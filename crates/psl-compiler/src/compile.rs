//! Rule text to compiled trie
//!
//! Parses, lowercases and optionally normalizes each rule, builds the rule
//! tree and encodes it. Malformed rules are skipped and counted; compiling
//! never fails.

use log::debug;

use psl_core::trie::CompiledTrie;
use psl_core::PublicSuffixList;

use crate::builder::build_trie;
use crate::parser::{needs_normalization, parse_rule_list};
use crate::trie::RuleTrie;

/// Compilation statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Rules accepted into the trie
    pub rules: usize,
    /// Rules dropped as malformed or rejected by the normalizer
    pub skipped: usize,
    /// Node records in the compiled buffer, root included
    pub nodes: usize,
    /// Size of the label pool in bytes
    pub pool_bytes: usize,
    /// Size of the compiled buffer in words
    pub buffer_words: usize,
}

/// Compile a rule list as-is.
pub fn compile_rules(text: &str) -> (CompiledTrie, CompileStats) {
    compile_inner(text, None)
}

/// Compile a rule list, passing every rule that holds bytes outside
/// `[a-z0-9.-]` through `normalizer` first.
///
/// The normalizer receives the lowercased rule without its `!` marker and
/// must return it unchanged when there is nothing to convert (wildcard rules
/// reach it too). Returning `None` skips the rule.
pub fn compile_rules_with<F>(text: &str, normalizer: F) -> (CompiledTrie, CompileStats)
where
    F: Fn(&str) -> Option<String>,
{
    let normalizer: &dyn Fn(&str) -> Option<String> = &normalizer;
    compile_inner(text, Some(normalizer))
}

fn compile_inner(
    text: &str,
    normalizer: Option<&dyn Fn(&str) -> Option<String>>,
) -> (CompiledTrie, CompileStats) {
    let mut trie = RuleTrie::new();
    let mut stats = CompileStats::default();

    for parsed in parse_rule_list(text) {
        let lowered = parsed.rule.to_ascii_lowercase();
        let rule = match normalizer {
            Some(normalize) if needs_normalization(&lowered) => match normalize(&lowered) {
                Some(rule) => rule,
                None => {
                    debug!("Skipping rule '{}': normalization failed", parsed.rule);
                    stats.skipped += 1;
                    continue;
                }
            },
            _ => lowered,
        };

        match trie.insert(&rule, parsed.exception) {
            Ok(()) => stats.rules += 1,
            Err(e) => {
                debug!("Skipping rule '{}': {}", parsed.rule, e);
                stats.skipped += 1;
            }
        }
    }

    let compiled = build_trie(&trie);
    let view = compiled.view();
    stats.nodes = view.node_count();
    stats.pool_bytes = view.pool_bytes();
    stats.buffer_words = compiled.words().len();

    debug!(
        "Compiled {} rules ({} skipped) into {} nodes, {} words",
        stats.rules, stats.skipped, stats.nodes, stats.buffer_words
    );
    (compiled, stats)
}

/// Compiling straight into a matching context.
pub trait CompileExt {
    /// Compile `text` and install the result, replacing any previous trie.
    fn compile(&mut self, text: &str) -> CompileStats;

    /// Like [`CompileExt::compile`], with a rule normalizer.
    fn compile_with<F>(&mut self, text: &str, normalizer: F) -> CompileStats
    where
        F: Fn(&str) -> Option<String>;
}

impl CompileExt for PublicSuffixList {
    fn compile(&mut self, text: &str) -> CompileStats {
        let (trie, stats) = compile_rules(text);
        self.install(trie);
        stats
    }

    fn compile_with<F>(&mut self, text: &str, normalizer: F) -> CompileStats
    where
        F: Fn(&str) -> Option<String>,
    {
        let (trie, stats) = compile_rules_with(text, normalizer);
        self.install(trie);
        stats
    }
}
