use std::fs;
use std::path::Path;
use std::time::Instant;

use log::debug;

use psl_compiler::{compile_rules, compile_rules_with, to_ascii, CompileStats};
use psl_core::trie::SNAPSHOT_FILE_MAGIC;
use psl_core::{PublicSuffixList, Snapshot};

/// Compile the rule list at `path`, returning the snapshot, its stats and the
/// compile time in milliseconds.
pub fn compile_snapshot(path: &Path, punycode: bool) -> Result<(Snapshot, CompileStats, f64), String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;

    let start = Instant::now();
    let (trie, stats) = if punycode {
        compile_rules_with(&content, to_ascii)
    } else {
        compile_rules(&content)
    };
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;

    let snapshot = Snapshot::new(trie.words().to_vec());
    snapshot
        .validate()
        .map_err(|e| format!("Generated snapshot failed validation: {}", e))?;

    Ok((snapshot, stats, total_ms))
}

pub fn write_snapshot(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    fs::write(path, bytes)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    Ok(())
}

/// Read a snapshot file in either the binary or the JSON form.
pub fn read_snapshot(path: &Path) -> Result<Snapshot, String> {
    let bytes = fs::read(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;

    let snapshot = if bytes.starts_with(&SNAPSHOT_FILE_MAGIC) {
        Snapshot::from_bytes(&bytes)
    } else {
        debug!("'{}' has no binary magic, reading as JSON", path.display());
        let text = String::from_utf8_lossy(&bytes);
        Snapshot::from_json(&text)
    };
    snapshot.map_err(|e| format!("Invalid snapshot '{}': {}", path.display(), e))
}

/// A list restored from the snapshot at `path`.
pub fn load_list(path: &Path) -> Result<PublicSuffixList, String> {
    let snapshot = read_snapshot(path)?;
    snapshot
        .validate()
        .map_err(|e| format!("Invalid snapshot '{}': {}", path.display(), e))?;

    let mut list = PublicSuffixList::new();
    if !list.restore(&snapshot) {
        return Err(format!("Snapshot '{}' was rejected", path.display()));
    }
    Ok(list)
}
