//! Cache model CLI.
//!
//! Replays a memory reference trace through one cache and prints its statistics:
//! 1. **Geometry:** From a JSON config file, overridden by individual flags.
//! 2. **Replay:** Every reference is looked up; misses are installed.
//! 3. **Report:** The labelled text block on stdout (or JSON with `--json`).
//!
//! Diagnostics go to stderr through `tracing` at `info` by default; set `RUST_LOG=debug`
//! for per-eviction output or `RUST_LOG=warn` to silence the summary.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::sim::{TraceDriver, load_trace};
use cachesim_core::{Cache, CacheConfig, CacheError, ReplacementPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache trace replayer",
    long_about = "Replay a memory trace through a set-associative cache and print hit/miss statistics.\n\nTrace lines are `<R|W> <hex address> [core]`; `#` starts a comment.\n\nExamples:\n  cachesim trace.txt --size 32768 --ways 8 --policy lru\n  cachesim trace.txt --config l1d.json --label L1D --json"
)]
struct Cli {
    /// Trace file to replay.
    trace: PathBuf,

    /// JSON cache configuration; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Total cache size in bytes.
    #[arg(short, long)]
    size: Option<u64>,

    /// Associativity (ways per set).
    #[arg(short, long)]
    ways: Option<u64>,

    /// Line size in bytes.
    #[arg(short, long)]
    line: Option<u64>,

    /// Replacement policy: recency|lru|frequency|lfu, or 0|1.
    #[arg(short, long)]
    policy: Option<String>,

    /// Label prefixed to every report line.
    #[arg(long, default_value = "CACHE")]
    label: String,

    /// Print statistics as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Builds the cache, replays the trace, and prints the report.
fn run(cli: &Cli) -> Result<(), CacheError> {
    let config = resolve_config(cli)?;
    let cache = Cache::new(&config)?;
    info!(
        num_sets = cache.num_sets(),
        ways = cache.ways(),
        line_bytes = cache.line_bytes(),
        policy = cache.policy().name(),
        "cache configured"
    );

    let records = load_trace(&cli.trace)?;
    let mut driver = TraceDriver::new(cache);
    let replayed = driver.run(&records)?;
    info!(replayed, writebacks = driver.writebacks(), "replay complete");

    if cli.json {
        println!("{}", driver.stats().to_json(&cli.label));
    } else {
        driver.stats().print(&cli.label);
    }
    Ok(())
}

/// Starts from the config file (or defaults) and applies flag overrides.
fn resolve_config(cli: &Cli) -> Result<CacheConfig, CacheError> {
    let mut config = match &cli.config {
        Some(path) => CacheConfig::from_file(path)?,
        None => CacheConfig::default(),
    };
    if let Some(size) = cli.size {
        config.size_bytes = size;
    }
    if let Some(ways) = cli.ways {
        config.ways = ways;
    }
    if let Some(line) = cli.line {
        config.line_bytes = line;
    }
    if let Some(policy) = &cli.policy {
        config.policy = policy.parse::<ReplacementPolicy>()?;
    }
    Ok(config)
}
