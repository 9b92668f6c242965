//! File system walker for discovering the source files to scan
//!
//! This module provides directory traversal with support for:
//! - .gitignore rules
//! - Source extension filtering
//! - Extension, file and directory blacklists
//! - Dotfile handling

use crate::Settings;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Walks directories to find source files to scan
#[derive(Debug)]
pub struct FileWalker {
    settings: Arc<Settings>,
}

impl FileWalker {
    /// Create a new file walker with the given settings
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Walk a directory and return an iterator of files to scan
    pub fn walk(&self, root: &Path) -> impl Iterator<Item = PathBuf> + use<> {
        let mut builder = WalkBuilder::new(root);

        builder
            .hidden(self.settings.input.blacklist_dotfiles)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .require_git(false); // Allow gitignore to work in non-git directories

        builder.add_custom_ignore_filename(".docweaveignore");

        // Prune blacklisted directories instead of filtering their files
        let blacklist_root = root.to_path_buf();
        let blacklist_settings = Arc::clone(&self.settings);
        builder.filter_entry(move |entry| {
            let Ok(relative) = entry.path().strip_prefix(&blacklist_root) else {
                return true;
            };
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !is_blacklisted_relative(&blacklist_settings, relative, is_dir)
        });

        let settings = Arc::clone(&self.settings);
        builder
            .build()
            .filter_map(Result::ok) // Skip files we can't access
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .filter(move |path| is_source_file(&settings, path))
    }

    /// Expand input paths into the files to scan.
    ///
    /// Files given explicitly are kept even if their extension is not a
    /// source extension, unless `input.force_blacklist` is set. Directories
    /// are walked.
    pub fn collect(&self, inputs: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for input in inputs {
            if input.is_dir() {
                files.extend(self.walk(input));
            } else if self.settings.input.force_blacklist
                && is_blacklisted_explicit(&self.settings, input)
            {
                debug!("Skipping blacklisted file {}", input.display());
            } else {
                files.push(input.clone());
            }
        }
        files.sort();
        files.dedup();
        files
    }

    /// Count files that would be scanned (useful for dry runs)
    pub fn count_files(&self, root: &Path) -> usize {
        self.walk(root).count()
    }
}

/// Blacklist check for a path relative to the walked directory.
fn is_blacklisted_relative(settings: &Settings, relative: &Path, is_dir: bool) -> bool {
    let entries = if is_dir {
        &settings.input.blacklist_dirs
    } else {
        &settings.input.blacklist_files
    };
    entries.iter().any(|entry| relative == Path::new(entry))
}

/// Blacklist check for a file named on the command line, which has no
/// walked directory to be relative to.
fn is_blacklisted_explicit(settings: &Settings, path: &Path) -> bool {
    let input = &settings.input;
    let dotfile = input.blacklist_dotfiles
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'));

    dotfile
        || !is_source_file(settings, path)
        || input.blacklist_files.iter().any(|file| path.ends_with(file))
        || path
            .parent()
            .is_some_and(|parent| {
                parent
                    .ancestors()
                    .any(|dir| input.blacklist_dirs.iter().any(|d| dir.ends_with(d)))
            })
}

fn is_source_file(settings: &Settings, path: &Path) -> bool {
    let extension = path.extension().and_then(|ext| ext.to_str());

    let blacklisted = settings
        .input
        .blacklist_extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.'))
        .any(|ext| match extension {
            Some(actual) => ext == actual,
            None => ext.is_empty(),
        });
    if blacklisted {
        return false;
    }

    extension.is_some_and(|actual| {
        settings
            .input
            .source_extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.') == actual)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("widget.hpp"), "struct widget;").unwrap();
        fs::write(root.join("report.h"), "struct report;").unwrap();
        fs::write(root.join("report.cpp"), "int main() {}").unwrap();
        fs::write(root.join("README.md"), "# Test").unwrap();

        let walker = FileWalker::new(Arc::new(Settings::default()));
        let files: Vec<_> = walker.walk(root).collect();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.ends_with("widget.hpp")));
        assert!(files.iter().any(|p| p.ends_with("report.h")));
    }

    #[test]
    fn test_ignore_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join(".hidden.h"), "int hidden;").unwrap();
        fs::write(root.join("visible.h"), "int visible;").unwrap();

        let walker = FileWalker::new(Arc::new(Settings::default()));
        let files: Vec<_> = walker.walk(root).collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.h"));

        let mut settings = Settings::default();
        settings.input.blacklist_dotfiles = false;
        let walker = FileWalker::new(Arc::new(settings));
        assert_eq!(walker.count_files(root), 2);
    }

    #[test]
    fn test_blacklisted_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("a.h"), "").unwrap();
        fs::write(root.join("b.hxx"), "").unwrap();

        let mut settings = Settings::default();
        settings.input.blacklist_extensions = vec![".hxx".to_string()];
        let walker = FileWalker::new(Arc::new(settings));

        let files: Vec<_> = walker.walk(root).collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.h"));
    }

    #[test]
    fn test_gitignore_respected() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        // Should work without git init due to require_git(false)
        fs::write(root.join(".gitignore"), "ignored.h\n").unwrap();
        fs::write(root.join("ignored.h"), "").unwrap();
        fs::write(root.join("included.h"), "").unwrap();

        let walker = FileWalker::new(Arc::new(Settings::default()));
        let files: Vec<_> = walker.walk(root).collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("included.h"));
    }

    #[test]
    fn test_blacklisted_files_and_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let detail = root.join("include").join("detail");
        fs::create_dir_all(&detail).unwrap();

        fs::write(root.join("include").join("api.h"), "").unwrap();
        fs::write(root.join("include").join("config.h"), "").unwrap();
        fs::write(detail.join("impl.h"), "").unwrap();
        fs::write(root.join("config.h"), "").unwrap();

        let mut settings = Settings::default();
        settings.input.blacklist_files = vec!["include/config.h".to_string()];
        settings.input.blacklist_dirs = vec!["include/detail".to_string()];
        let walker = FileWalker::new(Arc::new(settings));

        let mut files: Vec<_> = walker
            .walk(root)
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        files.sort();
        assert_eq!(
            files,
            vec![PathBuf::from("config.h"), PathBuf::from("include/api.h")]
        );
    }

    #[test]
    fn test_force_blacklist_applies_to_explicit_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let detail = root.join("detail");
        fs::create_dir_all(&detail).unwrap();

        let notes = root.join("notes.txt");
        let hidden = detail.join("impl.h");
        let kept = root.join("api.h");
        for file in [&notes, &hidden, &kept] {
            fs::write(file, "").unwrap();
        }
        let inputs = [notes.clone(), hidden.clone(), kept.clone()];

        let mut settings = Settings::default();
        settings.input.blacklist_dirs = vec!["detail".to_string()];
        let walker = FileWalker::new(Arc::new(settings.clone()));
        assert_eq!(walker.collect(&inputs).len(), 3);

        settings.input.force_blacklist = true;
        let walker = FileWalker::new(Arc::new(settings));
        assert_eq!(walker.collect(&inputs), vec![kept]);
    }

    #[test]
    fn test_collect_keeps_explicit_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let sub = root.join("include");
        fs::create_dir_all(&sub).unwrap();

        fs::write(sub.join("a.h"), "").unwrap();
        let explicit = root.join("notes.txt");
        fs::write(&explicit, "").unwrap();

        let walker = FileWalker::new(Arc::new(Settings::default()));
        let files = walker.collect(&[sub.clone(), explicit.clone(), sub]);

        assert_eq!(files.len(), 2);
        assert!(files.contains(&explicit));
    }
}
