//! Interactive check of a single typed identifier.
//!
//! Mirrors what an input form shows while someone types: the identifier in
//! display form, a marker under every suspect position, and one verdict line.

use anyhow::Result;
use checkid_common::display::SEPARATOR;
use checkid_core::{Assessment, Identifier, SuspectSet, assess, diagnose, format};
use checkid_io::parser::parse_typed;
use tracing::debug;

/// Everything the checker learned about one identifier.
#[derive(Debug)]
pub struct CheckReport {
    pub entered: Identifier,
    pub suspects: SuspectSet,
    pub assessment: Assessment,
}

/// Parses, diagnoses and assesses a typed identifier.
pub fn examine(input: &str, depth: usize) -> Result<CheckReport> {
    let entered = parse_typed(input)?;
    let suspects = diagnose(&entered)?;
    let assessment = assess(&entered, depth)?;
    debug!(
        id = %entered,
        suspects = suspects.len(),
        depth,
        "examined identifier"
    );
    Ok(CheckReport {
        entered,
        suspects,
        assessment,
    })
}

/// The single line shown to the person who typed the identifier.
pub fn verdict_line(assessment: &Assessment) -> String {
    match assessment {
        Assessment::Valid => "Correctly Entered".to_string(),
        Assessment::Corrected(id) => format!("Did you mean \"{}\"?", format(id)),
        Assessment::Ambiguous(candidates) => format!(
            "Unable to recognize ID ({} equally close candidates)",
            candidates.len()
        ),
        Assessment::Unrecognized => "Unable to recognize ID".to_string(),
    }
}

/// A line of `^` markers aligned under the suspect symbols of `format(id)`.
pub fn marker_line(id: &Identifier, suspects: &SuspectSet) -> String {
    let mut index = 0;
    let line: String = format(id)
        .chars()
        .map(|c| {
            if c == SEPARATOR {
                return ' ';
            }
            let marked = suspects.contains(index);
            index += 1;
            if marked { '^' } else { ' ' }
        })
        .collect();
    line.trim_end().to_string()
}

/// Checks one identifier and prints the result.
pub fn run_check(input: &str, depth: usize) -> Result<()> {
    let report = examine(input, depth)?;

    println!("Identifier: {}", format(&report.entered));
    if !report.suspects.is_empty() {
        println!("            {}", marker_line(&report.entered, &report.suspects));
        let positions: Vec<String> = report.suspects.iter().map(|i| i.to_string()).collect();
        println!("Suspects:   {}", positions.join(" "));
    }
    println!("{}", verdict_line(&report.assessment));

    if let Assessment::Ambiguous(candidates) = &report.assessment {
        for c in candidates {
            println!("  candidate: {}", format(c));
        }
    }
    Ok(())
}
