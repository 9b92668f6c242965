//! Parsing of comment text into comment content and binding directives.
//!
//! The first plain paragraph is the brief, later plain paragraphs are
//! details. A blank line ends the current paragraph. Section commands start
//! a paragraph of their section, and fenced code becomes a code block.

use crate::comment::{Comment, DocBlock, MemberGroup, Paragraph, SectionKind};

use super::commands::{Command, CommandTable, DirectiveKind};

/// How a parsed comment wants to be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentTarget {
    /// The declaration following the comment
    Position,
    /// An entity named by an `entity` command
    Entity(String),
    /// The file containing the comment
    File,
}

/// Comment on a member of the documented entity, e.g. a parameter.
#[derive(Debug, Clone)]
pub struct InlineComment {
    pub kind: DirectiveKind,
    pub name: String,
    pub comment: Comment,
}

#[derive(Debug, Clone)]
pub struct ParsedComment {
    pub comment: Comment,
    pub target: CommentTarget,
    pub inlines: Vec<InlineComment>,
    pub warnings: Vec<String>,
}

impl ParsedComment {
    /// True if the comment says something about the entity itself,
    /// not only about its members.
    pub fn documents_entity(&self) -> bool {
        !self.comment.is_empty()
            || self.comment.is_excluded()
            || self.comment.unique_name_override().is_some()
            || !self.comment.metadata().is_empty()
            || self.inlines.is_empty()
    }
}

enum Current {
    Paragraph { section: SectionKind, lines: Vec<String> },
    Inline { index: usize, lines: Vec<String> },
    Code { lines: Vec<String> },
}

struct Builder {
    comment: Comment,
    target: CommentTarget,
    inlines: Vec<InlineComment>,
    warnings: Vec<String>,
    current: Option<Current>,
    brief_seen: bool,
}

impl Builder {
    fn flush(&mut self) {
        match self.current.take() {
            Some(Current::Paragraph { section, lines }) => {
                if !lines.is_empty() {
                    self.comment
                        .content_mut()
                        .push(DocBlock::Paragraph(Paragraph::new(section, lines.join(" "))));
                }
            }
            Some(Current::Inline { index, lines }) => {
                let inline = &mut self.inlines[index];
                inline.comment = Comment::with_brief(lines.join(" "));
            }
            Some(Current::Code { lines }) => {
                self.comment.content_mut().push(DocBlock::Code {
                    text: lines.join("\n"),
                });
            }
            None => {}
        }
    }

    fn plain_text(&mut self, text: &str) {
        match self.current.as_mut() {
            Some(Current::Paragraph { lines, .. }) | Some(Current::Inline { lines, .. }) => {
                lines.push(text.to_string());
            }
            _ => {
                let section = if self.brief_seen {
                    SectionKind::Details
                } else {
                    self.brief_seen = true;
                    SectionKind::Brief
                };
                self.current = Some(Current::Paragraph {
                    section,
                    lines: vec![text.to_string()],
                });
            }
        }
    }

    fn directive(&mut self, kind: DirectiveKind, argument: &str) {
        if kind.is_inline() {
            self.inline(kind, argument);
            return;
        }

        let needs_argument = !matches!(kind, DirectiveKind::Exclude | DirectiveKind::File);
        if needs_argument && argument.is_empty() {
            self.warnings
                .push(format!("command '{}' requires an argument", kind.as_str()));
            return;
        }

        let metadata = self.comment.metadata_mut();
        match kind {
            DirectiveKind::Synopsis => metadata.synopsis = Some(argument.to_string()),
            DirectiveKind::SynopsisReturn => metadata.synopsis_return = Some(argument.to_string()),
            DirectiveKind::Group => {
                let (name, heading) = argument
                    .split_once(char::is_whitespace)
                    .map(|(name, heading)| (name, Some(heading.trim().to_string())))
                    .unwrap_or((argument, None));
                metadata.group = Some(MemberGroup {
                    name: name.to_string(),
                    heading,
                });
            }
            DirectiveKind::Module => metadata.module = Some(argument.to_string()),
            DirectiveKind::OutputSection => metadata.output_section = Some(argument.to_string()),
            _ => {}
        }

        match kind {
            DirectiveKind::Exclude => self.comment.set_excluded(true),
            DirectiveKind::File => self.target = CommentTarget::File,
            DirectiveKind::UniqueName => self.comment.set_unique_name_override(argument),
            DirectiveKind::Entity => self.target = CommentTarget::Entity(argument.to_string()),
            _ => {}
        }
    }

    fn inline(&mut self, kind: DirectiveKind, argument: &str) {
        let (name, text) = argument
            .split_once(char::is_whitespace)
            .unwrap_or((argument, ""));
        if name.is_empty() {
            self.warnings
                .push(format!("command '{}' requires a name", kind.as_str()));
            return;
        }

        self.inlines.push(InlineComment {
            kind,
            name: name.to_string(),
            comment: Comment::new(),
        });
        let text = text.trim();
        self.current = Some(Current::Inline {
            index: self.inlines.len() - 1,
            lines: if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            },
        });
    }

    fn finish(mut self) -> ParsedComment {
        self.flush();

        // The brief paragraph must come first
        let blocks = &mut self.comment.content_mut().blocks;
        let brief_pos = blocks
            .iter()
            .position(|b| matches!(b, DocBlock::Paragraph(p) if p.section == SectionKind::Brief));
        match brief_pos {
            Some(0) => {}
            Some(pos) => {
                let brief = blocks.remove(pos);
                blocks.insert(0, brief);
            }
            None => blocks.insert(
                0,
                DocBlock::Paragraph(Paragraph::new(SectionKind::Brief, "")),
            ),
        }

        ParsedComment {
            comment: self.comment,
            target: self.target,
            inlines: self.inlines,
            warnings: self.warnings,
        }
    }
}

/// Parse the text of a raw comment.
pub fn parse_comment(table: &CommandTable, text: &str) -> ParsedComment {
    let mut builder = Builder {
        comment: Comment::new(),
        target: CommentTarget::Position,
        inlines: Vec::new(),
        warnings: Vec::new(),
        current: None,
        brief_seen: false,
    };

    for line in text.lines() {
        if let Some(Current::Code { lines }) = builder.current.as_mut() {
            if line.trim_start().starts_with("```") {
                builder.flush();
            } else {
                lines.push(line.to_string());
            }
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            builder.flush();
            continue;
        }
        if trimmed.starts_with("```") {
            builder.flush();
            builder.current = Some(Current::Code { lines: Vec::new() });
            continue;
        }

        match table.parse_line(trimmed) {
            Some(Ok((Command::Section(section), argument))) => {
                builder.flush();
                if section == SectionKind::Brief {
                    builder.brief_seen = true;
                }
                builder.current = Some(Current::Paragraph {
                    section,
                    lines: if argument.is_empty() {
                        Vec::new()
                    } else {
                        vec![argument.to_string()]
                    },
                });
            }
            Some(Ok((Command::Directive(kind), argument))) => {
                builder.flush();
                builder.directive(kind, argument);
            }
            Some(Err(name)) => {
                builder.warnings.push(format!(
                    "unknown command '{}{name}'",
                    table.command_char()
                ));
                builder.plain_text(trimmed);
            }
            None => builder.plain_text(trimmed),
        }
    }

    builder.finish()
}
