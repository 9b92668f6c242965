//! Rendering of bound entities into Markdown or JSON documentation.

use serde::Serialize;

use crate::comment::{DocBlock, MemberGroup};
use crate::config::Settings;
use crate::indexing::BoundEntity;
use crate::types::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentationEntry {
    pub name: String,
    pub unique_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<MemberGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_section: Option<String>,
    pub brief: String,
    pub blocks: Vec<EntryBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryBlock {
    Section {
        /// Empty for details paragraphs
        title: String,
        text: String,
    },
    Code {
        text: String,
    },
}

/// Entries to document, in entity order.
///
/// Excluded entities are dropped, and so are undocumented ones unless
/// `input.require_comment` is off.
pub fn entries(bound: &[BoundEntity], settings: &Settings) -> Vec<DocumentationEntry> {
    let output = &settings.output;
    let tab = " ".repeat(output.tab_width as usize);

    bound
        .iter()
        .filter(|b| !b.is_excluded())
        .filter(|b| b.is_documented() || !settings.input.require_comment)
        .map(|b| {
            let name = if b.entity.name.is_empty() {
                output.hidden_name.clone()
            } else {
                b.entity.name.clone()
            };

            let mut brief = String::new();
            let mut blocks = Vec::new();
            let metadata = b
                .comment
                .as_ref()
                .map(|c| c.metadata().clone())
                .unwrap_or_default();
            if let Some(comment) = &b.comment {
                // Malformed content is rendered without a brief
                let skip = match comment.brief() {
                    Ok(p) => {
                        brief = p.text.clone();
                        1
                    }
                    Err(_) => 0,
                };
                for block in comment.content().blocks.iter().skip(skip) {
                    blocks.push(match block {
                        DocBlock::Paragraph(p) => EntryBlock::Section {
                            title: output.section_title(p.section).to_string(),
                            text: p.text.clone(),
                        },
                        DocBlock::Code { text } => EntryBlock::Code {
                            text: text.replace('\t', &tab),
                        },
                    });
                }
            }

            DocumentationEntry {
                name,
                unique_name: b.unique_name.clone(),
                kind: b.entity.kind.clone(),
                location: SourceLocation::new(b.entity.file.clone(), b.entity.line).to_string(),
                synopsis: metadata.synopsis,
                module: metadata.module,
                group: metadata.group,
                output_section: metadata.output_section,
                brief,
                blocks,
            }
        })
        .collect()
}

/// Markdown document with one section per entry.
pub fn render_markdown(entries: &[DocumentationEntry]) -> String {
    let mut out = String::new();
    let mut output_section: Option<&str> = None;

    for entry in entries {
        if let Some(section) = entry.output_section.as_deref()
            && output_section != Some(section)
        {
            out.push_str(&format!("# {section}\n\n"));
            output_section = Some(section);
        }

        match &entry.kind {
            Some(kind) => out.push_str(&format!("## {kind} `{}`\n\n", entry.unique_name)),
            None => out.push_str(&format!("## `{}`\n\n", entry.unique_name)),
        }
        out.push_str(&format!("<sub>{}</sub>\n\n", entry.location));
        if let Some(module) = &entry.module {
            out.push_str(&format!("*Module:* `{module}`\n\n"));
        }
        if let Some(group) = &entry.group {
            let title = group.heading.as_deref().unwrap_or(&group.name);
            out.push_str(&format!("*Group:* {title}\n\n"));
        }
        if let Some(synopsis) = &entry.synopsis {
            out.push_str(&format!("```cpp\n{synopsis}\n```\n\n"));
        }

        if !entry.brief.is_empty() {
            out.push_str(&entry.brief);
            out.push_str("\n\n");
        }

        for block in &entry.blocks {
            match block {
                EntryBlock::Section { title, text } if title.is_empty() => {
                    out.push_str(text);
                    out.push_str("\n\n");
                }
                EntryBlock::Section { title, text } => {
                    out.push_str(&format!("*{title}:* {text}\n\n"));
                }
                EntryBlock::Code { text } => {
                    out.push_str(&format!("```cpp\n{text}\n```\n\n"));
                }
            }
        }
    }

    out
}

pub fn render_json(entries: &[DocumentationEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}
