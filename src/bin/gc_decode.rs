//! Decode a nucleotide sequence into GC-rich intervals.
//!
//! ```bash
//! gc_decode -f genome.fa -m 0.01 -o intervals.txt
//! gc_decode -f genome.fa -m 0.01 -o intervals.txt -s dijkstra
//! ```
//!
//! Intervals are written one `start,end` pair per line (1-based, inclusive).
//! The decoded path's log-probability is printed on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use gc_decode::io::{read_sequence, write_intervals_file};
use gc_decode::utils::init_logging;
use gc_decode::{extract_intervals, Decoder, Model, Strategy};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "gc_decode", version)]
#[command(about = "Segment DNA into GC-rich and GC-poor regions with a two-state HMM")]
struct Args {
    /// Input sequence, FASTA or raw text.
    #[arg(short = 'f', long = "file")]
    file: PathBuf,
    /// Probability of switching state between adjacent positions.
    #[arg(short, long)]
    mu: f64,
    /// Output file for the GC-rich intervals.
    #[arg(short, long)]
    out: PathBuf,
    /// Decoding strategy: viterbi, bellman-ford, dijkstra or bidirectional.
    #[arg(short, long, default_value = "viterbi")]
    strategy: Strategy,
    /// Abort after this many search steps.
    #[arg(long)]
    step_budget: Option<usize>,
    /// Verbosity (-v debug, -vv trace); RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let model = Model::gc_content(args.mu).context("invalid switching probability")?;
    let obs = read_sequence(&args.file)
        .with_context(|| format!("failed to read sequence from {}", args.file.display()))?;
    tracing::info!(len = obs.len(), strategy = %args.strategy, "decoding");

    let decoder = args.strategy.decoder(args.step_budget);
    let start = Instant::now();
    let decoding = decoder
        .decode(&obs, &model)
        .with_context(|| format!("{} decoding failed", decoder.name()))?;
    tracing::info!(elapsed_s = start.elapsed().as_secs_f64(), "decoded");

    let intervals = extract_intervals(decoding.path());
    write_intervals_file(&args.out, &intervals)
        .with_context(|| format!("failed to write intervals to {}", args.out.display()))?;
    tracing::info!(count = intervals.len(), out = %args.out.display(), "wrote intervals");

    println!("{} log-probability: {:.2}", decoder.name(), decoding.log_prob());
    Ok(())
}
