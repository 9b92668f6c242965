//! Error types for the documentation generator
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::comment::CommentId;

/// Errors raised while building, registering or reading comments
#[derive(Error, Debug)]
pub enum CommentError {
    #[error("Comment location in '{file_name}' has line 0, lines start at 1")]
    ZeroLine { file_name: String },

    #[error("Inline comment at {file_name}:{line} has no entity name")]
    EmptyInlineName { file_name: String, line: u32 },

    #[error("Duplicate documentation comment for {id}")]
    DuplicateComment { id: CommentId },

    #[error("Comment content must start with a brief paragraph, found {found}")]
    MissingBrief { found: String },
}

impl CommentError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> String {
        match self {
            Self::ZeroLine { .. } => "ZERO_LINE",
            Self::EmptyInlineName { .. } => "EMPTY_INLINE_NAME",
            Self::DuplicateComment { .. } => "DUPLICATE_COMMENT",
            Self::MissingBrief { .. } => "MISSING_BRIEF",
        }
        .to_string()
    }

    /// Duplicates are reported and skipped, everything else is a defect upstream
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DuplicateComment { .. })
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::ZeroLine { .. } => vec!["Source lines are numbered from 1"],
            Self::EmptyInlineName { .. } => {
                vec!["Name the documented member, e.g. \\param count"]
            }
            Self::DuplicateComment { .. } => vec![
                "Remove one of the comments, only the first one is kept",
                "Use \\entity to document an entity by name instead of position",
            ],
            Self::MissingBrief { .. } => vec!["Start the comment with a one sentence summary"],
        }
    }
}

/// Main error type for documentation runs
#[derive(Error, Debug)]
pub enum DocError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load entities from '{path}': {source}")]
    EntitiesLoad {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unknown comment command '{name}'")]
    UnknownCommand { name: String },

    #[error("Command name '{name}' already in use")]
    CommandInUse { name: String },

    #[error("Cannot override section name for '{section}'")]
    ReservedSectionName { section: String },

    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    #[error("Failed to start worker pool: {reason}")]
    ThreadPool { reason: String },

    #[error(transparent)]
    Comment(#[from] CommentError),
}

impl DocError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR".to_string(),
            Self::FileWrite { .. } => "FILE_WRITE_ERROR".to_string(),
            Self::EntitiesLoad { .. } => "ENTITIES_LOAD_ERROR".to_string(),
            Self::UnknownCommand { .. } => "UNKNOWN_COMMAND".to_string(),
            Self::CommandInUse { .. } => "COMMAND_IN_USE".to_string(),
            Self::ReservedSectionName { .. } => "RESERVED_SECTION_NAME".to_string(),
            Self::ConfigError { .. } => "CONFIG_ERROR".to_string(),
            Self::ThreadPool { .. } => "THREAD_POOL_ERROR".to_string(),
            Self::Comment(e) => e.status_code(),
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Ensure the file is not locked by another process",
            ],
            Self::EntitiesLoad { .. } => vec![
                "The entity file must be a JSON array of {name, file, line} records",
                "Re-run the analysis pass to regenerate it",
            ],
            Self::UnknownCommand { .. } => vec![
                "Command overrides use the section or command kind as key, e.g. requires = \"pre\"",
            ],
            Self::CommandInUse { .. } => vec![
                "Pick a command name that no other command or section uses",
            ],
            Self::ReservedSectionName { .. } => vec![
                "Brief and details paragraphs have no heading, remove the override",
            ],
            Self::ConfigError { .. } => vec![
                "Run 'docweave init --force' to regenerate the configuration",
            ],
            Self::Comment(e) => e.recovery_suggestions(),
            _ => vec![],
        }
    }
}

pub type CommentResult<T> = Result<T, CommentError>;
pub type DocResult<T> = Result<T, DocError>;
