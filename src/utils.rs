//! Assorted utilities and helpers.

/// Relative tolerance used when comparing log-probabilities from decoders
/// that sum edge weights in different orders.
pub const LOG_PROB_TOLERANCE: f64 = 1e-9;

/// True when `a` and `b` agree to within `rel_tol`, relative to the larger
/// magnitude (absolute near zero).
#[inline]
pub fn relative_eq(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= rel_tol * scale
}

/// Fraction of positions where two equally long label sequences agree.
///
/// Returns 1.0 for two empty slices.
pub fn agreement<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return 1.0;
    }
    let same = a.iter().zip(b).filter(|(x, y)| x == y).count();
    same as f64 / a.len() as f64
}

/// Install a stderr `tracing` subscriber for the binaries.
///
/// `RUST_LOG` wins when set; otherwise `-v` counts map to `info`, `debug`,
/// then `trace`. Stdout stays free for program output.
#[cfg(feature = "tracing")]
pub fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
