use crate::parser::parse_line;
use anyhow::{Context, Result};
use checkid_core::{Identifier, format};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// What a batch-file line held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Id(Identifier),
    Unreadable { reason: String },
}

/// One identifier-bearing line of a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRecord {
    /// 1-based line number in the source file.
    pub line: usize,
    /// The line as written, without the trailing newline.
    pub text: String,
    pub entry: Entry,
}

impl IdRecord {
    pub fn identifier(&self) -> Option<&Identifier> {
        match &self.entry {
            Entry::Id(id) => Some(id),
            Entry::Unreadable { .. } => None,
        }
    }
}

/// Loads an identifier batch file.
///
/// Blank and comment lines are skipped. Every other line becomes a record;
/// lines that do not parse are kept as [`Entry::Unreadable`] with the parse
/// error so callers can report them alongside the rest.
///
/// # Arguments
///
/// * `path` - Path to the batch file
///
/// # Returns
///
/// Records in file order, or an error if the file cannot be read.
pub fn load_id_file<P: AsRef<Path>>(path: P) -> Result<Vec<IdRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open identifier file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", i + 1))?;
        let entry = match parse_line(&line) {
            Ok(Some(id)) => Entry::Id(id),
            Ok(None) => continue,
            Err(e) => {
                warn!(line = i + 1, error = %e, "unreadable identifier");
                Entry::Unreadable {
                    reason: e.to_string(),
                }
            }
        };
        records.push(IdRecord {
            line: i + 1,
            text: line,
            entry,
        });
    }

    debug!(path = %path.display(), records = records.len(), "loaded identifier file");
    Ok(records)
}

/// Writes identifiers one per line, grouped for display if `grouped` is set.
pub fn write_id_file<P: AsRef<Path>>(path: P, ids: &[Identifier], grouped: bool) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create identifier file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for id in ids {
        if grouped {
            writeln!(out, "{}", format(id))?;
        } else {
            writeln!(out, "{}", id)?;
        }
    }
    out.flush()?;

    debug!(path = %path.display(), count = ids.len(), "wrote identifier file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.txt");
        let ids = vec![id("ZZW0Q123F456789A"), id("2ZZ0Z000")];

        for grouped in [false, true] {
            write_id_file(&path, &ids, grouped).unwrap();
            let loaded: Vec<Identifier> = load_id_file(&path)
                .unwrap()
                .iter()
                .filter_map(|r| r.identifier().cloned())
                .collect();
            assert_eq!(loaded, ids);
        }

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "ZZW0-Q123-F456-789A\n2ZZ0-Z000\n");
    }

    #[test]
    fn test_bad_lines_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.txt");
        fs::write(
            &path,
            "# morning batch\n\nzzw0-q123-f456-789a\nTOTALLY WRONG\n2ZZ0-Z000 # last\n",
        )
        .unwrap();

        let records = load_id_file(&path).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].line, 3);
        assert_eq!(records[0].identifier(), Some(&id("ZZW0Q123F456789A")));

        assert_eq!(records[1].line, 4);
        assert_eq!(records[1].text, "TOTALLY WRONG");
        assert!(matches!(records[1].entry, Entry::Unreadable { .. }));

        assert_eq!(records[2].line, 5);
        assert_eq!(records[2].identifier(), Some(&id("2ZZ0Z000")));
    }

    #[test]
    fn test_missing_file() {
        let err = load_id_file("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("Failed to open identifier file"));
    }
}
