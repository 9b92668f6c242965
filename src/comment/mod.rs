//! Documentation comments and their binding to entities.

pub mod content;
pub mod id;
pub mod registry;

pub use content::{
    Comment, CommentContent, CommentMetadata, DocBlock, MemberGroup, Paragraph, SectionKind,
};
pub use id::{CommentId, base_file_name};
pub use registry::CommentRegistry;
