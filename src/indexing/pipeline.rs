//! Two-phase documentation run.
//!
//! 1. **Scan**: source files are read and scanned for comments in parallel,
//!    every worker registering into the run's shared [`CommentRegistry`].
//! 2. **Bind**: once scanning is done, each entity from the analysis pass is
//!    looked up in the registry.
//!
//! `bind` must not be called while a `scan` is in progress.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{FileWalker, ScanStats};
use crate::Settings;
use crate::comment::{Comment, CommentRegistry};
use crate::entity::{Entity, EntityIndex, EntityRecord, EntityRegistry};
use crate::error::{DocError, DocResult};
use crate::parsing::{CommandTable, FileComments, parse_comments};

/// An entity together with the comment that documents it.
#[derive(Debug, Clone)]
pub struct BoundEntity {
    pub entity: EntityRecord,
    /// Canonical name, after the comment's override if any
    pub unique_name: String,
    pub comment: Option<Arc<Comment>>,
}

impl BoundEntity {
    pub fn is_documented(&self) -> bool {
        self.comment.is_some()
    }

    pub fn is_excluded(&self) -> bool {
        self.comment.as_ref().is_some_and(|c| c.is_excluded())
    }
}

/// State of one documentation run.
pub struct DocumentationRun {
    settings: Arc<Settings>,
    commands: CommandTable,
    registry: CommentRegistry,
}

impl DocumentationRun {
    pub fn new(settings: Arc<Settings>) -> DocResult<Self> {
        settings.validate()?;
        let commands = CommandTable::new(&settings.comment)?;

        Ok(Self {
            settings,
            commands,
            registry: CommentRegistry::new(),
        })
    }

    pub fn registry(&self) -> &CommentRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Scan all source files under `inputs` and register their comments.
    pub fn scan(&self, inputs: &[PathBuf]) -> DocResult<ScanStats> {
        let started = Instant::now();
        let files = FileWalker::new(Arc::clone(&self.settings)).collect(inputs);
        info!("Scanning {} files for documentation comments", files.len());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.settings.input.parallel_threads)
            .build()
            .map_err(|e| DocError::ThreadPool {
                reason: e.to_string(),
            })?;

        // Workers only share the registry, results are merged afterwards
        let results: Vec<(PathBuf, DocResult<FileComments>)> = pool.install(|| {
            files
                .par_iter()
                .map(|path| (path.clone(), self.scan_file(path)))
                .collect()
        });

        let mut stats = ScanStats::new();
        for (path, result) in results {
            match result {
                Ok(file) => {
                    for warning in &file.warnings {
                        warn!("{warning}");
                    }
                    stats.record_file(path, &file);
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    stats.record_failure(path, &e);
                }
            }
        }
        stats.elapsed = started.elapsed();

        info!(
            "Registered {} comments from {} files ({} duplicates)",
            stats.comments_registered, stats.files_scanned, stats.duplicates
        );
        Ok(stats)
    }

    fn scan_file(&self, path: &Path) -> DocResult<FileComments> {
        let source = std::fs::read_to_string(path).map_err(|source| DocError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path.to_string_lossy();
        debug!("Scanning {file_name}");

        Ok(parse_comments(
            &self.commands,
            &self.registry,
            &file_name,
            &source,
        ))
    }

    /// Look up the comment of every entity in `entities`.
    pub fn bind(&self, entities: &EntityIndex) -> Vec<BoundEntity> {
        let bound: Vec<BoundEntity> = entities
            .iter()
            .map(|entity| {
                let comment = self.registry.lookup(entities, entity);
                let unique_name = comment
                    .as_ref()
                    .and_then(|c| c.unique_name_override().map(str::to_string))
                    .or_else(|| entities.unique_name(entity))
                    .unwrap_or_else(|| entity.name().to_string());

                BoundEntity {
                    entity: entity.clone(),
                    unique_name,
                    comment,
                }
            })
            .collect();

        let documented = bound.iter().filter(|b| b.is_documented()).count();
        info!("Bound {documented} of {} entities to comments", bound.len());
        bound
    }
}
