//! Stopwatch shorthands.
//!
//! Timestamps are seconds on a monotonic clock anchored at the first call in
//! the process, so they only make sense relative to each other.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

static ANCHOR: OnceLock<Instant> = OnceLock::new();

fn now() -> f64 {
    ANCHOR.get_or_init(Instant::now).elapsed().as_secs_f64()
}

fn elapsed_line(id: &str, elapsed: f64) -> String {
    format!("Elapsed on timer {id}: {elapsed}")
}

/// Start a timing measurement.
pub fn start() -> f64 {
    now()
}

/// Seconds elapsed since `start`, printed to stdout unless `silent`.
///
/// `id` tags the printed line so interleaved timers can be told apart.
pub fn end(start: f64, id: &str, silent: bool) -> f64 {
    let elapsed = now() - start;
    if !silent {
        println!("{}", elapsed_line(id, elapsed));
    }
    elapsed
}

/// Like [`end`], writing the report to `out`.
pub fn end_to<W: Write>(out: &mut W, start: f64, id: &str, silent: bool) -> io::Result<f64> {
    let elapsed = now() - start;
    if !silent {
        writeln!(out, "{}", elapsed_line(id, elapsed))?;
    }
    Ok(elapsed)
}
