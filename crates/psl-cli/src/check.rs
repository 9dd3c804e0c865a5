//! Runs the reference check-list against a compiled Public Suffix List.

use std::path::Path;

use psl_compiler::{to_ascii, REFERENCE_CHECKS};
use psl_core::PublicSuffixList;

use crate::snapshot;

fn quoted(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("'{}'", name),
        None => "null".to_string(),
    }
}

fn normalized(name: Option<&str>) -> String {
    name.and_then(to_ascii)
        .map(|n| n.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Run every case against `list`, returning the number of failures.
pub fn run_checks(list: &mut PublicSuffixList, verbose: bool) -> usize {
    let mut failures = 0;
    for &(host, expected) in REFERENCE_CHECKS {
        let got = list.registrable_domain(&normalized(host));
        let want = normalized(expected);
        if got == want {
            if verbose {
                println!("   Success: check({}, {})", quoted(host), quoted(expected));
            }
        } else {
            failures += 1;
            let got = if got.is_empty() { None } else { Some(got.as_str()) };
            println!(
                "\u{2757} Failure: got {} instead: check({}, {})",
                quoted(got),
                quoted(host),
                quoted(expected)
            );
        }
    }
    failures
}

pub fn run_check(input: &Path, verbose: bool) -> Result<(), String> {
    let (snapshot, stats, _) = snapshot::compile_snapshot(input, true)?;
    let mut list = PublicSuffixList::new();
    if !list.restore(&snapshot) {
        return Err("Compiled snapshot was rejected".to_string());
    }

    println!("Checking '{}' ({} rules)", input.display(), stats.rules);
    let failures = run_checks(&mut list, verbose);
    println!("Finished with {} failure(s) out of {} checks", failures, REFERENCE_CHECKS.len());

    if failures == 0 {
        Ok(())
    } else {
        Err(format!("{} reference check(s) failed", failures))
    }
}
