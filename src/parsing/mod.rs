//! Scanning of documentation comments out of source files.
//!
//! Each file is scanned independently, so files can be processed by
//! parallel workers sharing one [`CommentRegistry`].

pub mod commands;
pub mod markup;
pub mod scanner;

pub use commands::{Command, CommandTable, DirectiveKind};
pub use markup::{CommentTarget, InlineComment, ParsedComment, parse_comment};
pub use scanner::{RawComment, scan_source};

use tracing::{debug, warn};

use crate::comment::{CommentId, CommentRegistry, base_file_name};
use crate::error::{CommentError, CommentResult};

/// Outcome of scanning one file.
#[derive(Debug, Default)]
pub struct FileComments {
    /// Comments that were registered
    pub registered: usize,
    /// Registrations rejected because the identifier was taken
    pub conflicts: Vec<CommentError>,
    /// Markup problems, prefixed with their location
    pub warnings: Vec<String>,
}

/// Scan `source` and register its comments.
///
/// Positional comments are registered under the location of the line they
/// document, `entity` comments under the entity name, and inline comments
/// under the inline location of their member.
pub fn parse_comments(
    table: &CommandTable,
    registry: &CommentRegistry,
    file_name: &str,
    source: &str,
) -> FileComments {
    let mut result = FileComments::default();

    for raw in scan_source(source) {
        let parsed = parse_comment(table, &raw.text);
        for warning in &parsed.warnings {
            result
                .warnings
                .push(format!("{file_name}:{}: {warning}", raw.begin_line));
        }

        match register_parsed(registry, file_name, raw.target_line, parsed) {
            Ok(outcome) => {
                result.registered += outcome.registered;
                result.conflicts.extend(outcome.conflicts);
            }
            Err(e) => result
                .warnings
                .push(format!("{file_name}:{}: {e}", raw.begin_line)),
        }
    }

    debug!(
        "Scanned {file_name}: {} comments registered, {} conflicts",
        result.registered,
        result.conflicts.len()
    );
    result
}

struct Registered {
    registered: usize,
    conflicts: Vec<CommentError>,
}

fn register_parsed(
    registry: &CommentRegistry,
    file_name: &str,
    target_line: u32,
    parsed: ParsedComment,
) -> CommentResult<Registered> {
    let mut entries = Vec::with_capacity(parsed.inlines.len() + 1);
    let documents_entity = parsed.documents_entity();

    let entity_name = match &parsed.target {
        CommentTarget::Position => None,
        CommentTarget::Entity(name) => Some(name.clone()),
        CommentTarget::File => Some(base_file_name(file_name).to_string()),
    };

    for inline in parsed.inlines {
        let id = match &entity_name {
            Some(entity) => CommentId::name(format!("{entity}.{}", inline.name)),
            None => CommentId::inline_location(file_name, target_line, &inline.name)?,
        };
        entries.push((id, inline.comment));
    }

    if documents_entity {
        let id = match entity_name {
            Some(entity) => CommentId::name(entity),
            None => CommentId::location(file_name, target_line)?,
        };
        entries.insert(0, (id, parsed.comment));
    }

    let mut outcome = Registered {
        registered: 0,
        conflicts: Vec::new(),
    };
    for (id, comment) in entries {
        match registry.try_register(id, comment) {
            Ok(()) => outcome.registered += 1,
            Err(conflict) => {
                warn!("{file_name}: {conflict}");
                outcome.conflicts.push(conflict);
            }
        }
    }
    Ok(outcome)
}
