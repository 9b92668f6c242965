//! Documentation comment content
//!
//! The content of a comment is a flat document tree: a list of blocks, each
//! either a paragraph belonging to a section or a code block. A well-formed
//! comment starts with the brief paragraph.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CommentError, CommentResult};

/// Section a paragraph of a comment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Brief,
    Details,
    Requires,
    Effects,
    Synchronization,
    Postconditions,
    Returns,
    Throws,
    Complexity,
    Remarks,
    ErrorConditions,
    Notes,
    See,
}

impl SectionKind {
    pub const ALL: [SectionKind; 13] = [
        SectionKind::Brief,
        SectionKind::Details,
        SectionKind::Requires,
        SectionKind::Effects,
        SectionKind::Synchronization,
        SectionKind::Postconditions,
        SectionKind::Returns,
        SectionKind::Throws,
        SectionKind::Complexity,
        SectionKind::Remarks,
        SectionKind::ErrorConditions,
        SectionKind::Notes,
        SectionKind::See,
    ];

    /// Name used for the command introducing the section and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Brief => "brief",
            SectionKind::Details => "details",
            SectionKind::Requires => "requires",
            SectionKind::Effects => "effects",
            SectionKind::Synchronization => "synchronization",
            SectionKind::Postconditions => "postconditions",
            SectionKind::Returns => "returns",
            SectionKind::Throws => "throws",
            SectionKind::Complexity => "complexity",
            SectionKind::Remarks => "remarks",
            SectionKind::ErrorConditions => "error_conditions",
            SectionKind::Notes => "notes",
            SectionKind::See => "see",
        }
    }

    /// Heading shown in generated documentation, empty for brief and details.
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionKind::Brief | SectionKind::Details => "",
            SectionKind::Requires => "Requires",
            SectionKind::Effects => "Effects",
            SectionKind::Synchronization => "Synchronization",
            SectionKind::Postconditions => "Postconditions",
            SectionKind::Returns => "Returns",
            SectionKind::Throws => "Throws",
            SectionKind::Complexity => "Complexity",
            SectionKind::Remarks => "Remarks",
            SectionKind::ErrorConditions => "Error conditions",
            SectionKind::Notes => "Notes",
            SectionKind::See => "See also",
        }
    }
}

impl FromStr for SectionKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or("Unknown section kind")
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub section: SectionKind,
    pub text: String,
}

impl Paragraph {
    pub fn new(section: SectionKind, text: impl Into<String>) -> Self {
        Self {
            section,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocBlock {
    Paragraph(Paragraph),
    Code { text: String },
}

impl DocBlock {
    pub fn text(&self) -> &str {
        match self {
            DocBlock::Paragraph(paragraph) => &paragraph.text,
            DocBlock::Code { text } => text,
        }
    }
}

/// Document tree of a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentContent {
    /// Unique name of the entity this content is attached to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub blocks: Vec<DocBlock>,
}

impl CommentContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: DocBlock) {
        self.blocks.push(block);
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            DocBlock::Paragraph(paragraph) => Some(paragraph),
            DocBlock::Code { .. } => None,
        })
    }

    /// Paragraphs of one section, in order.
    pub fn section(&self, kind: SectionKind) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs().filter(move |p| p.section == kind)
    }
}

/// Member group an entity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

/// Presentation hints set by commands, kept apart from the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentMetadata {
    pub synopsis: Option<String>,
    pub synopsis_return: Option<String>,
    pub group: Option<MemberGroup>,
    pub module: Option<String>,
    pub output_section: Option<String>,
}

impl CommentMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    content: CommentContent,
    metadata: CommentMetadata,
    unique_name_override: Option<String>,
    excluded: bool,
}

impl Comment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comment holding only a brief paragraph.
    pub fn with_brief(text: impl Into<String>) -> Self {
        let mut comment = Self::new();
        comment
            .content
            .push(DocBlock::Paragraph(Paragraph::new(SectionKind::Brief, text)));
        comment
    }

    pub fn content(&self) -> &CommentContent {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut CommentContent {
        &mut self.content
    }

    pub fn set_content(&mut self, content: CommentContent) {
        self.content = content;
    }

    pub fn metadata(&self) -> &CommentMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut CommentMetadata {
        &mut self.metadata
    }

    /// The brief paragraph, which must be the first block.
    pub fn brief(&self) -> CommentResult<&Paragraph> {
        match self.content.blocks.first() {
            Some(DocBlock::Paragraph(p)) if p.section == SectionKind::Brief => Ok(p),
            Some(DocBlock::Paragraph(p)) => Err(CommentError::MissingBrief {
                found: p.section.to_string(),
            }),
            Some(DocBlock::Code { .. }) => Err(CommentError::MissingBrief {
                found: "code block".to_string(),
            }),
            None => Err(CommentError::MissingBrief {
                found: "nothing".to_string(),
            }),
        }
    }

    /// True if no block carries any text.
    pub fn is_empty(&self) -> bool {
        self.content
            .blocks
            .iter()
            .all(|block| block.text().trim().is_empty())
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub fn set_excluded(&mut self, excluded: bool) {
        self.excluded = excluded;
    }

    pub fn unique_name_override(&self) -> Option<&str> {
        self.unique_name_override.as_deref()
    }

    pub fn set_unique_name_override(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.unique_name_override = if name.is_empty() { None } else { Some(name) };
    }

    /// Deep copy of this comment, attached to `parent` when given.
    ///
    /// Used when one comment documents several syntheses of the same entity.
    pub fn duplicate(&self, parent: Option<&str>) -> Comment {
        let mut copy = self.clone();
        copy.content.parent = parent.map(str::to_string);
        copy
    }
}
