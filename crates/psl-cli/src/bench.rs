use std::path::Path;
use std::time::Instant;

use psl_core::PublicSuffixList;

use crate::snapshot;

pub struct BenchOptions {
    pub snapshot_path: String,
    pub input_path: Option<String>,
    pub iterations: usize,
}

const BUDGET_RESTORE_MS: f64 = 50.0;
const BUDGET_LOOKUP_P99_US: f64 = 50.0;
const BUDGET_SNAPSHOT_MB: f64 = 4.0;

const HOSTS: &[&str] = &[
    "www.example.com",
    "a.b.example.uk.com",
    "cdn.static.example.co.uk",
    "www.test.k12.ak.us",
    "a.b.ide.kyoto.jp",
    "www.city.kobe.jp",
    "a.b.c.mm",
    "www.www.ck",
    "shishi.xn--55qx5d.cn",
    "deeply.nested.host.name.example.example",
];

pub fn run_bench(opts: BenchOptions) -> Result<(), String> {
    println!("Lookup Budget Check");
    println!("==================================================");

    let snapshot_path = Path::new(&opts.snapshot_path);
    if let Some(input) = &opts.input_path {
        let (snapshot, stats, total_ms) = snapshot::compile_snapshot(Path::new(input), true)?;
        snapshot::write_snapshot(snapshot_path, &snapshot.to_bytes())?;
        println!("Compiled '{}': {} rules in {:.1}ms", input, stats.rules, total_ms);
    }

    let snapshot = snapshot::read_snapshot(snapshot_path)?;
    let snapshot_size_mb = snapshot.to_bytes().len() as f64 / (1024.0 * 1024.0);

    println!("Restoring snapshot...");
    let restore_begin = Instant::now();
    let mut list = PublicSuffixList::new();
    if !list.restore(&snapshot) {
        return Err(format!("Snapshot '{}' was rejected", snapshot_path.display()));
    }
    let restore_ms = restore_begin.elapsed().as_secs_f64() * 1000.0;

    println!("Warming up...");
    for _ in 0..1000 {
        for host in HOSTS {
            let _ = list.registrable_domain(host);
        }
    }

    println!("Measuring lookup latency...");
    let latencies = measure_lookup_latency(&mut list, opts.iterations);
    let p50_us = percentile(&latencies, 0.50);
    let p99_us = percentile(&latencies, 0.99);

    let mut passed = true;
    println!();
    println!("Results");
    println!("--------------------------------------------------");

    passed &= report_budget("Snapshot Size", snapshot_size_mb, BUDGET_SNAPSHOT_MB, "MB");
    passed &= report_budget("Restore", restore_ms, BUDGET_RESTORE_MS, "ms");
    println!("  Lookup P50 Latency: {:.2} μs", p50_us);
    passed &= report_budget("Lookup P99 Latency", p99_us, BUDGET_LOOKUP_P99_US, "μs");

    println!();
    println!("==================================================");

    if passed {
        println!("✓ All lookup budgets passed");
        Ok(())
    } else {
        Err("Lookup budget exceeded".to_string())
    }
}

fn report_budget(name: &str, actual: f64, limit: f64, unit: &str) -> bool {
    let passed = actual <= limit;
    let status = if passed { "✓" } else { "✗" };
    println!(
        "{} {}: {:.2} {} (limit: {:.2} {})",
        status, name, actual, unit, limit, unit
    );
    passed
}

/// Time each lookup; consecutive hosts differ, so every call re-stages.
fn measure_lookup_latency(list: &mut PublicSuffixList, iterations: usize) -> Vec<f64> {
    let mut latencies = Vec::with_capacity(iterations * HOSTS.len());

    for _ in 0..iterations {
        for host in HOSTS {
            let start = Instant::now();
            let _ = list.registrable_domain(host);
            latencies.push(start.elapsed().as_secs_f64() * 1_000_000.0);
        }
    }

    latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    latencies
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64) * p).ceil() as usize;
    let idx = idx.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}
