//! Comment identifiers
//!
//! A [`CommentId`] says which entity a documentation comment is meant for.
//! There are three addressing schemes:
//! - by source location (the declaration on the line after the comment)
//! - by inline location (one of several entities sharing a line)
//! - by canonical name (explicit binding, overrides positional matching)

use std::cmp::Ordering;
use std::fmt;

use crate::error::{CommentError, CommentResult};

/// The identifier of a comment, used as the key of the comment registry.
#[derive(Debug, Clone)]
pub enum CommentId {
    /// The comment documents the declaration on `line` of `file_name`.
    Location { file_name: String, line: u32 },
    /// The comment documents `entity_name` among the entities declared on `line`.
    InlineLocation {
        file_name: String,
        line: u32,
        entity_name: String,
    },
    /// The comment documents the entity with this canonical name.
    Name { unique_name: String },
}

impl CommentId {
    /// Identifier of the comment preceding `line` in `file_name`.
    ///
    /// Only the final path component of `file_name` is kept.
    pub fn location(file_name: &str, line: u32) -> CommentResult<Self> {
        let file_name = base_file_name(file_name);
        if line == 0 {
            return Err(CommentError::ZeroLine {
                file_name: file_name.to_string(),
            });
        }

        Ok(Self::Location {
            file_name: file_name.to_string(),
            line,
        })
    }

    /// Identifier of the inline comment for `entity_name` on `line` of `file_name`.
    pub fn inline_location(file_name: &str, line: u32, entity_name: &str) -> CommentResult<Self> {
        let file_name = base_file_name(file_name);
        if line == 0 {
            return Err(CommentError::ZeroLine {
                file_name: file_name.to_string(),
            });
        }
        if entity_name.is_empty() {
            return Err(CommentError::EmptyInlineName {
                file_name: file_name.to_string(),
                line,
            });
        }

        Ok(Self::InlineLocation {
            file_name: file_name.to_string(),
            line,
            entity_name: entity_name.to_string(),
        })
    }

    /// Identifier of the comment explicitly bound to `unique_name`.
    pub fn name(unique_name: impl Into<String>) -> Self {
        Self::Name {
            unique_name: unique_name.into(),
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name { .. })
    }

    pub fn is_location(&self) -> bool {
        matches!(self, Self::Location { .. })
    }

    pub fn is_inline_location(&self) -> bool {
        matches!(self, Self::InlineLocation { .. })
    }

    /// Base file name, `None` for a name identifier.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Location { file_name, .. } | Self::InlineLocation { file_name, .. } => {
                Some(file_name)
            }
            Self::Name { .. } => None,
        }
    }

    /// Line number (never zero), `None` for a name identifier.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Location { line, .. } | Self::InlineLocation { line, .. } => Some(*line),
            Self::Name { .. } => None,
        }
    }

    /// Entity name of an inline location, `None` for the other forms.
    pub fn inline_entity_name(&self) -> Option<&str> {
        match self {
            Self::InlineLocation { entity_name, .. } => Some(entity_name),
            _ => None,
        }
    }

    /// Canonical name of a name identifier, `None` for the location forms.
    pub fn unique_name(&self) -> Option<&str> {
        match self {
            Self::Name { unique_name } => Some(unique_name),
            _ => None,
        }
    }
}

/// Strips everything up to the last `/`, `\` or `:`.
pub fn base_file_name(path: &str) -> &str {
    match path.rfind(['/', '\\', ':']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

impl Ord for CommentId {
    fn cmp(&self, other: &Self) -> Ordering {
        use CommentId::*;

        match (self, other) {
            (Name { unique_name: a }, Name { unique_name: b }) => a.cmp(b),
            (Name { .. }, _) => Ordering::Greater,
            (_, Name { .. }) => Ordering::Less,
            _ => location_key(self).cmp(&location_key(other)),
        }
    }
}

/// Sort key of the location forms; an absent inline name sorts first.
fn location_key(id: &CommentId) -> (Option<&str>, Option<u32>, Option<&str>) {
    (id.file_name(), id.line(), id.inline_entity_name())
}

impl PartialOrd for CommentId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CommentId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CommentId {}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location { file_name, line } => write!(f, "{file_name}:{line}"),
            Self::InlineLocation {
                file_name,
                line,
                entity_name,
            } => write!(f, "{file_name}:{line} ({entity_name})"),
            Self::Name { unique_name } => write!(f, "'{unique_name}'"),
        }
    }
}
