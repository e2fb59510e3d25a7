//! Generate a synthetic sequence with a known GC-rich / GC-poor labelling.
//!
//! ```bash
//! gc_simulate -n 100000 -m 0.01 --seed 7 --fasta sim.fa --hidden sim.hidden
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use gc_decode::intervals::extract_intervals;
use gc_decode::io::{write_fasta, write_hidden_path};
use gc_decode::simulate::simulate_gc;
use gc_decode::utils::init_logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gc_simulate", version)]
#[command(about = "Simulate a sequence and its hidden path from the GC-content model")]
struct Args {
    /// Number of positions to simulate.
    #[arg(short = 'n', long)]
    len: usize,
    /// Probability of switching state between adjacent positions.
    #[arg(short, long)]
    mu: f64,
    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// FASTA output for the observed sequence.
    #[arg(long)]
    fasta: PathBuf,
    /// Output for the hidden path (`h` = rich, `l` = poor).
    #[arg(long)]
    hidden: PathBuf,
    /// FASTA record id.
    #[arg(long, default_value = "simulated")]
    id: String,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let sim = simulate_gc(args.mu, args.len, args.seed).context("simulation failed")?;
    write_fasta(&args.fasta, &args.id, &sim.observed)
        .with_context(|| format!("failed to write {}", args.fasta.display()))?;
    write_hidden_path(&args.hidden, &sim.hidden)
        .with_context(|| format!("failed to write {}", args.hidden.display()))?;

    tracing::info!(
        len = args.len,
        seed = args.seed,
        rich_runs = extract_intervals(&sim.hidden).len(),
        "simulated"
    );
    Ok(())
}
