/// Documentation generator binding doc comments to code entities
pub mod comment;
pub mod config;
pub mod entity;
pub mod error;
pub mod indexing;
pub mod parsing;
pub mod render;
pub mod types;

// Explicit exports for better API clarity
pub use comment::{Comment, CommentContent, CommentId, CommentRegistry, SectionKind};
pub use config::Settings;
pub use entity::{Entity, EntityIndex, EntityRecord, EntityRegistry};
pub use error::{CommentError, CommentResult, DocError, DocResult};
pub use indexing::{BoundEntity, DocumentationRun, FileWalker, ScanStats};
pub use parsing::{CommandTable, parse_comments};
pub use types::SourceLocation;
