use crate::check::verdict_line;
use crate::stats::LatencyStats;
use anyhow::Result;
use checkid_core::{Assessment, assess, format};
use checkid_io::loader::{self, Entry, IdRecord};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Per-verdict counts and latency for a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub valid: usize,
    pub corrected: usize,
    pub ambiguous: usize,
    pub unrecognized: usize,
    /// Parsed, but with a length the layout rejects.
    pub malformed: usize,
    pub unreadable: usize,
    pub latency: LatencyStats,
    /// Line number and message for every record that was not valid as entered.
    pub notes: Vec<(usize, String)>,
}

impl BatchSummary {
    pub fn checked(&self) -> usize {
        self.valid + self.corrected + self.ambiguous + self.unrecognized
    }

    fn merge(mut self, other: Self) -> Self {
        self.valid += other.valid;
        self.corrected += other.corrected;
        self.ambiguous += other.ambiguous;
        self.unrecognized += other.unrecognized;
        self.malformed += other.malformed;
        self.unreadable += other.unreadable;
        self.latency = self.latency.merge(other.latency);
        self.notes.extend(other.notes);
        self
    }

    fn record(mut self, record: &IdRecord, depth: usize) -> Self {
        let id = match &record.entry {
            Entry::Id(id) => id,
            Entry::Unreadable { reason } => {
                self.unreadable += 1;
                self.notes.push((record.line, format!("unreadable: {}", reason)));
                return self;
            }
        };

        let start = Instant::now();
        let result = assess(id, depth);
        self.latency.update(start.elapsed().as_nanos() as u64);

        match result {
            Ok(Assessment::Valid) => self.valid += 1,
            Ok(assessment) => {
                match assessment {
                    Assessment::Corrected(_) => self.corrected += 1,
                    Assessment::Ambiguous(_) => self.ambiguous += 1,
                    _ => self.unrecognized += 1,
                }
                let note = format!("{}: {}", format(id), verdict_line(&assessment));
                self.notes.push((record.line, note));
            }
            Err(e) => {
                self.malformed += 1;
                self.notes.push((record.line, e.to_string()));
            }
        }
        self
    }
}

/// Assesses every record in parallel.
///
/// Each rayon worker folds into its own summary; summaries are merged at the
/// end and notes are returned in line order.
pub fn check_records(records: &[IdRecord], depth: usize) -> BatchSummary {
    let mut summary = records
        .par_iter()
        .fold(BatchSummary::default, |acc, record| acc.record(record, depth))
        .reduce(BatchSummary::default, BatchSummary::merge);
    summary.notes.sort_by_key(|(line, _)| *line);
    summary
}

pub fn run_batch(input_path: &str, depth: usize) -> Result<()> {
    println!("Loading identifiers from {}...", input_path);
    let start_load = Instant::now();
    let records = loader::load_id_file(input_path)?;
    println!(
        "Loaded {} records in {:?}.",
        records.len(),
        start_load.elapsed()
    );

    println!("Starting Batch Check (Parallel - Rayon, depth {})...", depth);
    let start_bench = Instant::now();
    let summary = check_records(&records, depth);
    let seconds = start_bench.elapsed().as_secs_f64();
    let throughput = records.len() as f64 / seconds;

    for (line, note) in &summary.notes {
        println!("line {:>6}: {}", line, note);
    }

    println!("Results");
    println!("Time: {:.4} s", seconds);
    println!("Throughput: {:.2} ids/s", throughput);
    println!("Valid:        {}", summary.valid);
    println!("Corrected:    {}", summary.corrected);
    println!("Ambiguous:    {}", summary.ambiguous);
    println!("Unrecognized: {}", summary.unrecognized);
    println!("Malformed:    {}", summary.malformed);
    println!("Unreadable:   {}", summary.unreadable);
    summary.latency.print_report();

    info!(
        checked = summary.checked(),
        corrected = summary.corrected,
        "batch complete"
    );
    Ok(())
}
