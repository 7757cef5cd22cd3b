//! The import run: load every entry, validate it, hand it to a sink.

use crate::dayone::EntrySink;
use crate::entry::{entry_paths, JourneyEntry};
use crate::error::Result;
use crate::validate::{SkipReason, ValidatedEntry, Validator, Verdict};
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub succeeded: usize,
    pub failed: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len() + self.skipped.len()
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.skipped {
            writeln!(f, "SKIPPED: {}", path.display())?;
        }
        for path in &self.failed {
            writeln!(f, "FAILED: {}", path.display())?;
        }
        write!(
            f,
            "{} succeeded, {} failed, {} skipped",
            self.succeeded,
            self.failed.len(),
            self.skipped.len()
        )
    }
}

/// Imports every entry under `source_dir` into `journal`.
///
/// Every entry is loaded and validated before the first one is handed to the
/// sink, so progress counts only the entries that will be imported. Only an
/// unreadable source directory fails the run. Entries that cannot be decoded
/// or that the sink rejects are reported as failed.
pub fn run_import(
    journal: &str,
    source_dir: &Path,
    validator: &Validator,
    sink: &mut dyn EntrySink,
) -> Result<ImportReport> {
    let mut report = ImportReport::default();
    let mut pending = Vec::new();
    for path in entry_paths(source_dir)? {
        let entry = match JourneyEntry::from_path(&path) {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("{err}");
                report.failed.push(path);
                continue;
            }
        };

        match validator.validate(&entry) {
            Verdict::Import(validated) => pending.push((path, validated)),
            Verdict::Skip(reason) => {
                match reason {
                    SkipReason::Empty => log::warn!("{}: empty entry skipped", entry.id),
                    SkipReason::AlreadyExported => {
                        log::info!("{}: already exported, skipped", entry.id)
                    }
                }
                report.skipped.push(path);
            }
        }
    }

    let count = pending.len();
    log::debug!("importing {count} entries with {}", sink.name());
    for (index, (path, validated)) in pending.into_iter().enumerate() {
        match sink.add(journal, &validated) {
            Ok(new_id) => {
                log::info!("{}", progress_line(index + 1, count, &validated, &new_id));
                report.succeeded += 1;
            }
            Err(err) => {
                log::error!("{}: {err}", path.display());
                report.failed.push(path);
            }
        }
    }
    report.failed.sort();
    Ok(report)
}

/// `[i/n] Added new: <id> -> <new id>: …`, listing only non-zero counts.
fn progress_line(position: usize, count: usize, entry: &ValidatedEntry, new_id: &str) -> String {
    let counts: Vec<String> = [
        (entry.word_count(), "words"),
        (entry.tags.len(), "tags"),
        (entry.photos.len(), "photos"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, what)| format!("{n} {what}"))
    .collect();

    let mut line = format!("[{position}/{count}] Added new: {} -> {new_id}", entry.id);
    if !counts.is_empty() {
        line.push_str(": ");
        line.push_str(&counts.join(", "));
    }
    line
}
