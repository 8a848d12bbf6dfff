//! Correction benchmark under a fixed number of substitutions.
//!
//! Issues identifiers, damages each one in exactly `errors` distinct
//! positions, and measures how often the corrector returns the identifier
//! that was issued. Cases are generated sequentially from one seeded
//! generator, so a seed reproduces the whole run; assessment runs in parallel.

use crate::generator::{issue, rng_from, substitute_distinct};
use crate::stats::LatencyStats;
use anyhow::{Result, bail};
use checkid_core::{Assessment, Identifier, assess};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// How one damaged identifier fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The corrector returned exactly the issued identifier.
    Recovered,
    /// The corrector confidently returned a different identifier.
    Miscorrected,
    /// Several candidates verified; whether the issued one is among them is recorded.
    Ambiguous { includes_original: bool },
    Unrecognized,
}

pub fn classify(issued: &Identifier, entered: &Identifier, assessment: &Assessment) -> Outcome {
    match assessment.resolved(entered) {
        Some(id) if id == issued => Outcome::Recovered,
        Some(_) => Outcome::Miscorrected,
        None => match assessment {
            Assessment::Ambiguous(candidates) => Outcome::Ambiguous {
                includes_original: candidates.contains(issued),
            },
            _ => Outcome::Unrecognized,
        },
    }
}

#[derive(Debug, Clone, Default)]
pub struct BenchSummary {
    pub recovered: usize,
    pub miscorrected: usize,
    pub ambiguous: usize,
    pub ambiguous_with_original: usize,
    pub unrecognized: usize,
    pub latency: LatencyStats,
}

impl BenchSummary {
    fn add(mut self, outcome: Outcome, nanos: u64) -> Self {
        match outcome {
            Outcome::Recovered => self.recovered += 1,
            Outcome::Miscorrected => self.miscorrected += 1,
            Outcome::Ambiguous { includes_original } => {
                self.ambiguous += 1;
                if includes_original {
                    self.ambiguous_with_original += 1;
                }
            }
            Outcome::Unrecognized => self.unrecognized += 1,
        }
        self.latency.update(nanos);
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.recovered += other.recovered;
        self.miscorrected += other.miscorrected;
        self.ambiguous += other.ambiguous;
        self.ambiguous_with_original += other.ambiguous_with_original;
        self.unrecognized += other.unrecognized;
        self.latency = self.latency.merge(other.latency);
        self
    }

    pub fn total(&self) -> usize {
        self.recovered + self.miscorrected + self.ambiguous + self.unrecognized
    }
}

/// Builds `count` (issued, damaged) pairs.
pub fn build_cases(
    len: usize,
    count: usize,
    errors: usize,
    seed: Option<u64>,
) -> Result<Vec<(Identifier, Identifier)>> {
    let mut rng = rng_from(seed);
    (0..count)
        .map(|_| {
            let issued = issue(len, &mut rng)?;
            let damaged = substitute_distinct(&issued, errors, &mut rng);
            Ok((issued, damaged))
        })
        .collect()
}

/// Assesses every case in parallel and tallies the outcomes.
pub fn evaluate(cases: &[(Identifier, Identifier)], depth: usize) -> Result<BenchSummary> {
    cases
        .par_iter()
        .map(|(issued, damaged)| -> Result<(Outcome, u64)> {
            let start = Instant::now();
            let assessment = assess(damaged, depth)?;
            let nanos = start.elapsed().as_nanos() as u64;
            Ok((classify(issued, damaged, &assessment), nanos))
        })
        .try_fold(BenchSummary::default, |acc, item| -> Result<BenchSummary> {
            let (outcome, nanos) = item?;
            Ok(acc.add(outcome, nanos))
        })
        .try_reduce(BenchSummary::default, |a, b| Ok(a.merge(b)))
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

pub fn run_bench(
    len: usize,
    count: usize,
    errors: usize,
    depth: usize,
    seed: Option<u64>,
) -> Result<()> {
    if errors > len {
        bail!("cannot substitute {} positions in a length-{} identifier", errors, len);
    }

    println!(
        "Generating {} identifiers of length {} with {} substitutions each...",
        count, len, errors
    );
    let cases = build_cases(len, count, errors, seed)?;

    println!("Starting Benchmark (Parallel - Rayon, depth {})...", depth);
    let start_bench = Instant::now();
    let summary = evaluate(&cases, depth)?;
    let seconds = start_bench.elapsed().as_secs_f64();
    let total = summary.total();

    println!("Results");
    println!("Time: {:.4} s", seconds);
    println!("Throughput: {:.2} ids/s", total as f64 / seconds);
    println!(
        "Recovered:    {:>8} ({:.2}%)",
        summary.recovered,
        percent(summary.recovered, total)
    );
    println!(
        "Miscorrected: {:>8} ({:.2}%)",
        summary.miscorrected,
        percent(summary.miscorrected, total)
    );
    println!(
        "Ambiguous:    {:>8} ({:.2}%, original among candidates in {})",
        summary.ambiguous,
        percent(summary.ambiguous, total),
        summary.ambiguous_with_original
    );
    println!(
        "Unrecognized: {:>8} ({:.2}%)",
        summary.unrecognized,
        percent(summary.unrecognized, total)
    );
    summary.latency.print_report();

    info!(
        recovered = summary.recovered,
        miscorrected = summary.miscorrected,
        total,
        "benchmark complete"
    );
    Ok(())
}
