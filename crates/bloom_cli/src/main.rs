use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bloom_core::{expected_fpr, BloomFilter, FilterConfig};

#[derive(Parser)]
#[command(name = "bloomf", about = "Bloom filter CLI: membership, sizing, FPR runs")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args)]
struct ShapeArgs {
    /// JSON file with `size` and `hash_count`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Bit count (overrides the config file)
    #[arg(long)]
    size: Option<u64>,
    /// Hash rounds per item (overrides the config file)
    #[arg(long)]
    hashes: Option<u32>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Add items (one per line) and report each query as maybe/absent
    Check {
        #[command(flatten)]
        shape: ShapeArgs,
        /// Items file; stdin when omitted
        #[arg(long)]
        items: Option<PathBuf>,
        #[arg(required = true)]
        queries: Vec<String>,
    },

    /// Suggest size and hash count for a capacity and error rate
    Plan {
        #[arg(long)]
        capacity: u64,
        #[arg(long)]
        error_rate: f64,
    },

    /// Insert item0..itemN, probe the next M items, compare with theory
    Fpr {
        #[command(flatten)]
        shape: ShapeArgs,
        #[arg(long, default_value_t = 100)]
        inserted: u64,
        #[arg(long, default_value_t = 1000)]
        probes: u64,
    },

    /// Print the effective filter config as JSON
    Config {
        #[command(flatten)]
        shape: ShapeArgs,
    },
}

impl ShapeArgs {
    fn resolve(&self) -> Result<FilterConfig> {
        let mut cfg = match &self.config {
            Some(p) => load_config(p)?,
            None => FilterConfig::default(),
        };
        if let Some(size) = self.size {
            cfg.size = size;
        }
        if let Some(k) = self.hashes {
            cfg.hash_count = k;
        }
        debug!(size = cfg.size, hash_count = cfg.hash_count, "effective config");
        Ok(cfg)
    }
}

fn load_config(path: &Path) -> Result<FilterConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

fn read_items(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) => std::fs::read(p).with_context(|| format!("reading items {}", p.display())),
        None => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Splits raw bytes into items on `\n`, dropping a trailing `\r` per line.
/// Lines need not be UTF-8.
fn item_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let lines = (!content.is_empty()).then(|| body.split(|&b| b == b'\n'));
    lines
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

fn percent(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Check { shape, items, queries } => {
            let mut bf = shape.resolve()?.build()?;
            let content = read_items(items.as_deref())?;
            let mut added = 0usize;
            for line in item_lines(&content) {
                bf.add(line);
                added += 1;
            }
            info!(added, ones = bf.count_ones(), "items loaded");
            for q in &queries {
                let verdict = if bf.check(q) { "maybe" } else { "absent" };
                println!("{q}\t{verdict}");
            }
        }
        Cmd::Plan { capacity, error_rate } => {
            let cfg = FilterConfig::for_capacity(capacity, error_rate)?;
            println!("size={} hash_count={}", cfg.size, cfg.hash_count);
            println!("bytes={}", cfg.size.div_ceil(8));
            println!(
                "expected_fpr_at_capacity={}",
                percent(expected_fpr(cfg.size, cfg.hash_count, capacity))
            );
        }
        Cmd::Fpr { shape, inserted, probes } => {
            let Some(end) = inserted.checked_add(probes) else {
                bail!("--inserted {inserted} plus --probes {probes} overflows u64");
            };
            let mut bf: BloomFilter = shape.resolve()?.build()?;
            for i in 0..inserted {
                bf.add(format!("item{i}"));
            }
            if let Some(i) = (0..inserted).find(|i| !bf.check(format!("item{i}"))) {
                bail!("false negative for item{i}");
            }
            let hits = (inserted..end)
                .filter(|i| bf.check(format!("item{i}")))
                .count();
            let observed = if probes == 0 { 0.0 } else { hits as f64 / probes as f64 };
            println!("observed: {} ({hits}/{probes})", percent(observed));
            println!("expected: {}", percent(bf.expected_fpr(inserted)));
            println!("load_factor: {:.4}", bf.load_factor());
        }
        Cmd::Config { shape } => {
            let cfg = shape.resolve()?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }
    Ok(())
}
