use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gc_decode::simulate::simulate_gc;
use gc_decode::utils::{init_logging, relative_eq, LOG_PROB_TOLERANCE};
use gc_decode::{Decoder, Model, ObservedSequence, Strategy, ViterbiDecoder};
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const LENGTHS: &[usize] = &[64, 256, 1024, 4096, 16384, 65536, 262144];

/// Time every decoding strategy on seeded synthetic sequences and check each
/// score against Viterbi.
#[derive(Parser, Debug)]
#[command(name = "scale_probe", version)]
struct Options {
    /// Output format for the measurements (stdout).
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
    /// Longest sequence to run Bellman-Ford on; it is quadratic.
    #[arg(long, default_value_t = 4096)]
    bellman_ford_limit: usize,
    /// Switching probability used to simulate and decode.
    #[arg(long, default_value_t = 0.01)]
    mu: f64,
    #[arg(long, default_value_t = 44)]
    seed: u64,
    /// Longest sequence in the battery.
    #[arg(long)]
    max_len: Option<usize>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn write(self, measurements: &[Measurement]) -> Result<()> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct Measurement {
    strategy: &'static str,
    len: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    log_prob: Option<f64>,
    status: VerificationStatus,
    detail: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum VerificationStatus {
    Reference,
    Passed,
    Failed,
    Skipped,
}

impl VerificationStatus {
    fn label(self) -> &'static str {
        match self {
            VerificationStatus::Reference => "reference",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
            VerificationStatus::Skipped => "skipped",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            VerificationStatus::Reference | VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::Skipped => "○",
        }
    }
}

fn main() -> Result<()> {
    let options = Options::parse();
    init_logging(options.verbose);

    let model = Model::gc_content(options.mu).context("invalid --mu")?;
    let lengths: Vec<usize> = LENGTHS
        .iter()
        .copied()
        .filter(|&len| options.max_len.map_or(true, |max| len <= max))
        .collect();

    let mut sys = System::new();
    let mut measurements = Vec::new();
    for (idx, &len) in lengths.iter().enumerate() {
        eprintln!("[{}/{}] len={len}", idx + 1, lengths.len());
        let sim = simulate_gc(options.mu, len, options.seed.wrapping_add(len as u64))
            .with_context(|| format!("failed to simulate length {len}"))?;
        measurements.extend(probe_length(&options, &model, &sim.observed, &mut sys));
    }

    options.format.write(&measurements)?;
    print_summary(&measurements, &options);
    Ok(())
}

/// Run every strategy on one sequence. Viterbi runs first and is the
/// reference score for the others.
fn probe_length(
    options: &Options,
    model: &Model,
    obs: &ObservedSequence,
    sys: &mut System,
) -> Vec<Measurement> {
    let len = obs.len();
    let reference = measure(ViterbiDecoder::new().name(), len, sys, || {
        ViterbiDecoder::new().decode(obs, model).map(|d| d.log_prob())
    });
    let baseline = reference.log_prob;
    let mut out = vec![Measurement {
        status: if baseline.is_some() {
            VerificationStatus::Reference
        } else {
            VerificationStatus::Failed
        },
        ..reference
    }];

    for strategy in Strategy::ALL {
        if strategy == Strategy::Viterbi {
            continue;
        }
        let decoder = strategy.decoder(None);
        if strategy == Strategy::BellmanFord && len > options.bellman_ford_limit {
            out.push(Measurement {
                strategy: decoder.name(),
                len,
                wall_s: 0.0,
                rss_delta_kib: 0,
                log_prob: None,
                status: VerificationStatus::Skipped,
                detail: Some(format!("len > {}", options.bellman_ford_limit)),
            });
            continue;
        }
        let mut m = measure(decoder.name(), len, sys, || {
            decoder.decode(obs, model).map(|d| d.log_prob())
        });
        if m.status != VerificationStatus::Failed {
            m.status = match (m.log_prob, baseline) {
                (Some(got), Some(want)) if relative_eq(got, want, LOG_PROB_TOLERANCE) => {
                    VerificationStatus::Passed
                }
                (Some(got), Some(want)) => {
                    m.detail = Some(format!("viterbi={want:.6}, got={got:.6}"));
                    VerificationStatus::Failed
                }
                _ => VerificationStatus::Skipped,
            };
        }
        out.push(m);
    }

    for m in &out {
        eprintln!(
            "      {} {:<22} logp={:<16} time={:.3}s status={}",
            m.status.icon(),
            m.strategy,
            m.log_prob.map_or_else(|| "-".to_string(), |p| format!("{p:.3}")),
            m.wall_s,
            m.status.label()
        );
    }
    out
}

fn measure<F>(strategy: &'static str, len: usize, sys: &mut System, run: F) -> Measurement
where
    F: FnOnce() -> Result<f64, gc_decode::DecodeError>,
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let result = run();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    let (log_prob, status, detail) = match result {
        Ok(p) => (Some(p), VerificationStatus::Skipped, None),
        Err(err) => (None, VerificationStatus::Failed, Some(err.to_string())),
    };
    tracing::debug!(strategy, len, wall_s = duration.as_secs_f64(), "measured");
    Measurement {
        strategy,
        len,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        log_prob,
        status,
        detail,
    }
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Summary (mu={}, seed={})", options.mu, options.seed);
    eprintln!("{}", "=".repeat(80));

    let failed: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Failed)
        .collect();
    let skipped = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Skipped)
        .count();
    eprintln!("  runs: {}", measurements.len());
    eprintln!("  failed: {}", failed.len());
    eprintln!("  skipped: {skipped}");
    for m in &failed {
        eprintln!(
            "  ✗ {} (len={}): {}",
            m.strategy,
            m.len,
            m.detail.as_deref().unwrap_or("")
        );
    }

    let mut by_strategy: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements.iter().filter(|m| m.log_prob.is_some()) {
        by_strategy.entry(m.strategy).or_default().push(m);
    }
    eprintln!();
    for (strategy, ms) in &by_strategy {
        let total: f64 = ms.iter().map(|m| m.wall_s).sum();
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        eprintln!(
            "  {strategy}: runs={}, total={total:.3}s, max_rss_delta={max_mem} KiB",
            ms.len()
        );
        if let (Some(first), Some(last)) = (ms.first(), ms.last()) {
            if ms.len() >= 2 && first.wall_s > 0.0 {
                eprintln!(
                    "    {:.1}x slower from len={} to len={}",
                    last.wall_s / first.wall_s,
                    first.len,
                    last.len
                );
            }
        }
    }
    eprintln!("{}", "=".repeat(80));
}

fn write_csv(measurements: &[Measurement]) -> Result<()> {
    println!("strategy,len,wall_s,rss_delta_kib,log_prob,status,detail");
    for m in measurements {
        let detail = m.detail.as_ref().map(|s| s.replace('"', "'")).unwrap_or_default();
        println!(
            "{},{},{:.6},{},{},{},\"{}\"",
            m.strategy,
            m.len,
            m.wall_s,
            m.rss_delta_kib,
            m.log_prob.map(|p| p.to_string()).unwrap_or_default(),
            m.status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<()> {
    let col1 = measurements
        .iter()
        .map(|m| m.strategy.len())
        .max()
        .unwrap_or(0)
        .max("strategy".len());

    println!(
        "{:<col1$}  {:>8}  {:>10}  {:>14}  {:>18}  {:>10}  detail",
        "strategy", "len", "wall_s", "rss_delta_kib", "log_prob", "status"
    );
    println!(
        "{:-<col1$}  {:-<8}  {:-<10}  {:-<14}  {:-<18}  {:-<10}  {:-<6}",
        "", "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:>8}  {:>10.4}  {:>14}  {:>18}  {:>10}  {}",
            m.strategy,
            m.len,
            m.wall_s,
            m.rss_delta_kib,
            m.log_prob.map_or_else(|| "-".to_string(), |p| format!("{p:.4}")),
            m.status.label(),
            m.detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<()> {
    let json = serde_json::to_string_pretty(measurements).context("serialize measurements")?;
    println!("{json}");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}
