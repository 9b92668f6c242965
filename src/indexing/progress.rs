//! Outcome of scanning a set of files

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::comment::CommentId;
use crate::error::{CommentError, DocError};
use crate::parsing::FileComments;

/// Rejected identifiers shown per file in the summary
const CONFLICTS_SHOWN: usize = 5;

/// Totals of one scan, with the files that need attention.
#[derive(Debug, Default)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub comments_registered: usize,
    pub duplicates: usize,
    pub warnings: usize,
    pub elapsed: Duration,
    /// Unreadable files and the reason
    pub failures: Vec<(PathBuf, String)>,
    /// Identifiers a file tried to register that were already taken
    pub conflicts: BTreeMap<PathBuf, Vec<CommentId>>,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file(&mut self, path: PathBuf, file: &FileComments) {
        self.files_scanned += 1;
        self.comments_registered += file.registered;
        self.warnings += file.warnings.len();
        self.duplicates += file.conflicts.len();

        let ids: Vec<CommentId> = file
            .conflicts
            .iter()
            .filter_map(|conflict| match conflict {
                CommentError::DuplicateComment { id } => Some(id.clone()),
                _ => None,
            })
            .collect();
        if !ids.is_empty() {
            self.conflicts.entry(path).or_default().extend(ids);
        }
    }

    pub fn record_failure(&mut self, path: PathBuf, error: &DocError) {
        self.files_failed += 1;
        self.failures.push((path, error.to_string()));
    }

    /// Multi-line summary for the terminal.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Scanned {} files in {:.2}s: {} comments registered, {} duplicates, {} warnings",
            self.files_scanned,
            self.elapsed.as_secs_f64(),
            self.comments_registered,
            self.duplicates,
            self.warnings
        );

        for (path, ids) in &self.conflicts {
            let _ = write!(out, "\n  {}: duplicate ", path.display());
            let shown: Vec<String> = ids
                .iter()
                .take(CONFLICTS_SHOWN)
                .map(ToString::to_string)
                .collect();
            out.push_str(&shown.join(", "));
            if ids.len() > CONFLICTS_SHOWN {
                let _ = write!(out, " and {} more", ids.len() - CONFLICTS_SHOWN);
            }
        }
        for (path, reason) in &self.failures {
            let _ = write!(out, "\n  {}: {reason}", path.display());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicates(file: &str, lines: std::ops::RangeInclusive<u32>) -> FileComments {
        FileComments {
            registered: 1,
            conflicts: lines
                .map(|line| CommentError::DuplicateComment {
                    id: CommentId::location(file, line).unwrap(),
                })
                .collect(),
            warnings: vec!["a.h:1: unknown command '\\bogus'".to_string()],
        }
    }

    #[test]
    fn test_record_file_groups_conflicts() {
        let mut stats = ScanStats::new();
        stats.record_file(PathBuf::from("include/a.h"), &duplicates("a.h", 1..=2));
        stats.record_file(PathBuf::from("include/b.h"), &FileComments::default());

        assert_eq!(stats.files_scanned, 2);
        assert_eq!(stats.comments_registered, 1);
        assert_eq!(stats.duplicates, 2);
        assert_eq!(stats.warnings, 1);
        assert_eq!(stats.conflicts.len(), 1);
        assert_eq!(stats.conflicts[&PathBuf::from("include/a.h")].len(), 2);
    }

    #[test]
    fn test_summary_lists_files() {
        let mut stats = ScanStats::new();
        stats.record_file(PathBuf::from("a.h"), &duplicates("a.h", 1..=7));
        stats.record_failure(
            PathBuf::from("gone.h"),
            &DocError::ConfigError {
                reason: "x".to_string(),
            },
        );

        let summary = stats.summary();
        assert!(summary.starts_with("Scanned 1 files"));
        assert!(summary.contains("a.h: duplicate a.h:1, a.h:2, a.h:3, a.h:4, a.h:5 and 2 more"));
        assert!(summary.contains("gone.h: Invalid configuration: x"));
        assert_eq!(stats.files_failed, 1);
    }
}
