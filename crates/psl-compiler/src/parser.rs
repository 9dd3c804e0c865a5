//! Rule list parser for the Public Suffix List grammar
//!
//! One rule per line, `//` starts a comment (also after a rule), a leading
//! `!` marks an exception rule. Blank lines are ignored. Nothing in here can
//! fail: whatever cannot be a rule is dropped.

/// A rule as it appears in the list, before lowercasing or normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRule<'a> {
    pub rule: &'a str,
    pub exception: bool,
}

/// Parse every rule line of `text`.
///
/// Lines end at `\n` or `\r`, so LF, CRLF and CR-only files parse the same.
pub fn parse_rule_list(text: &str) -> impl Iterator<Item = ParsedRule<'_>> {
    text.split(|c| c == '\n' || c == '\r')
        .filter_map(parse_rule_line)
}

/// Parse a single line, returning `None` for blank and comment-only lines.
pub fn parse_rule_line(line: &str) -> Option<ParsedRule<'_>> {
    let line = match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    };

    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    Some(match line.strip_prefix('!') {
        Some(rule) => ParsedRule { rule, exception: true },
        None => ParsedRule { rule: line, exception: false },
    })
}

/// Whether a lowercased rule holds anything besides `[a-z0-9.-]`.
///
/// Such rules (wildcards, IDN labels) are the ones handed to a normalizer.
pub fn needs_normalization(rule: &str) -> bool {
    rule.bytes()
        .any(|b| !matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-'))
}

/// ASCII form of a rule or hostname: ASCII input passes through unchanged,
/// anything else goes through IDNA. Usable directly as a compile normalizer.
#[cfg(feature = "idna")]
pub fn to_ascii(name: &str) -> Option<String> {
    if name.is_ascii() {
        Some(name.to_string())
    } else {
        idna::domain_to_ascii(name).ok()
    }
}
