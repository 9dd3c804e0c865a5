//! Public Suffix List CLI
//!
//! CLI tool for compiling rule lists into snapshots and querying them.

mod bench;
mod check;
mod snapshot;

use std::io;
use std::path::Path;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use psl_core::trie::NODE_WORDS;
use psl_core::TrieView;

#[derive(Parser)]
#[command(name = "psl-cli")]
#[command(about = "Public Suffix List compiler and lookup tools")]
struct Cli {
    /// Log filter (e.g. "debug", "psl_compiler=debug"); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a rule list into a snapshot
    Compile {
        /// Input rule list (public_suffix_list.dat)
        #[arg(short, long)]
        input: String,

        /// Output snapshot file
        #[arg(short, long, default_value = "psl.snap")]
        output: String,

        /// Convert IDN rules to punycode
        #[arg(long)]
        punycode: bool,

        /// Write the JSON form instead of the binary form
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Dump snapshot info
    Info {
        /// Snapshot file to inspect
        #[arg(short, long)]
        input: String,
    },

    /// Look up hostnames in a snapshot
    Query {
        /// Snapshot file
        #[arg(short, long)]
        snapshot: String,

        /// Print the registrable domain instead of the public suffix
        #[arg(long)]
        domain: bool,

        /// Print both results and the lookup time
        #[arg(short, long)]
        verbose: bool,

        /// Hostnames to look up
        #[arg(required = true)]
        hosts: Vec<String>,
    },

    /// Compile a rule list and run the reference check-list against it
    Check {
        /// Input rule list
        #[arg(short, long)]
        input: String,

        /// Print passing checks too
        #[arg(short, long)]
        verbose: bool,
    },

    /// Measure restore time and lookup latency against fixed budgets
    Bench {
        /// Snapshot file
        #[arg(short, long, default_value = "psl.snap")]
        snapshot: String,

        /// Compile this rule list into the snapshot first
        #[arg(short, long)]
        input: Option<String>,

        /// Lookup rounds over the sample hostnames
        #[arg(long, default_value_t = 2000)]
        iterations: usize,
    },
}

fn init_tracing(level: Option<&str>, verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(fallback)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(
        cli.command,
        Commands::Compile { verbose: true, .. } | Commands::Query { verbose: true, .. }
    );
    init_tracing(cli.log_level.as_deref(), verbose);

    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            punycode,
            json,
            verbose,
        } => cmd_compile(&input, &output, punycode, json, verbose),
        Commands::Info { input } => cmd_info(&input),
        Commands::Query {
            snapshot,
            domain,
            verbose,
            hosts,
        } => cmd_query(&snapshot, domain, verbose, &hosts),
        Commands::Check { input, verbose } => check::run_check(Path::new(&input), verbose),
        Commands::Bench {
            snapshot,
            input,
            iterations,
        } => bench::run_bench(bench::BenchOptions {
            snapshot_path: snapshot,
            input_path: input,
            iterations,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_compile(input: &str, output: &str, punycode: bool, json: bool, verbose: bool) -> Result<(), String> {
    let (snapshot, stats, total_ms) = snapshot::compile_snapshot(Path::new(input), punycode)?;

    let bytes = if json {
        snapshot
            .to_json()
            .map_err(|e| format!("Failed to serialize snapshot: {}", e))?
            .into_bytes()
    } else {
        snapshot.to_bytes()
    };
    snapshot::write_snapshot(Path::new(output), &bytes)?;

    println!("Compiled '{}' to '{}'", input, output);
    println!("  Rules:    {} ({} skipped)", stats.rules, stats.skipped);
    if verbose {
        println!("  Nodes:    {}", stats.nodes);
        println!("  Pool:     {} bytes", stats.pool_bytes);
        println!("  Buffer:   {} words", stats.buffer_words);
    }
    println!("  Size:     {} bytes ({:.1} KB)", bytes.len(), bytes.len() as f64 / 1024.0);
    println!("  Time:     {:.1}ms", total_ms);

    Ok(())
}

fn cmd_info(input: &str) -> Result<(), String> {
    let snapshot = snapshot::read_snapshot(Path::new(input))?;
    let words = snapshot
        .validate()
        .map_err(|e| format!("Invalid snapshot: {}", e))?;
    let view = TrieView::new(words);

    println!("Snapshot: {}", input);
    println!("  Magic:       {}", snapshot.magic);
    println!("  Total size:  {} bytes ({:.1} KB)", words.len() * 4, words.len() as f64 / 256.0);
    println!();
    println!("Trie:");
    println!("  Nodes:       {}", view.node_count());
    println!("  Node bytes:  {}", view.node_count() * NODE_WORDS * 4);
    println!("  Pool bytes:  {}", view.pool_bytes());
    println!("  TLD nodes:   {}", tld_count(&view));

    Ok(())
}

/// Top-level labels carrying rules, leaving out the implicit `*` every trie has.
fn tld_count(view: &TrieView<'_>) -> usize {
    let root = view.root();
    let implicit = usize::from(view.wildcard_child(root).is_some());
    view.child_count(root) - implicit
}

fn cmd_query(path: &str, domain: bool, verbose: bool, hosts: &[String]) -> Result<(), String> {
    let mut list = snapshot::load_list(Path::new(path))?;

    for host in hosts {
        let ascii = psl_compiler::to_ascii(host)
            .ok_or_else(|| format!("Invalid hostname '{}'", host))?;
        debug!("Querying '{}' as '{}'", host, ascii);

        let start = Instant::now();
        let suffix = list.public_suffix(&ascii);
        let registrable = list.registrable_domain(&ascii);
        let elapsed_us = start.elapsed().as_secs_f64() * 1_000_000.0;

        if verbose {
            let offsets = match list.suffix_boundary(&ascii) {
                Some(b) => format!("[{}..{}, {}..{}]", b.suffix_start, b.len, b.domain_start, b.len),
                None => "[]".to_string(),
            };
            println!(
                "{}  suffix={:?}  domain={:?}  offsets={}  ({:.1} μs)",
                host, suffix, registrable, offsets, elapsed_us
            );
        } else if domain {
            println!("{}", registrable);
        } else {
            println!("{}", suffix);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use psl_compiler::compile_rules;

    #[test]
    fn test_tld_count_leaves_out_implicit_wildcard() {
        let (trie, _) = compile_rules("com\nuk\nco.uk\n");
        assert_eq!(tld_count(&trie.view()), 2);

        let (empty, _) = compile_rules("");
        assert_eq!(tld_count(&empty.view()), 0);
    }
}
