//! Extraction of raw documentation comments from source text.
//!
//! Recognized forms:
//! - runs of `///` or `//!` lines
//! - `/** ... */` and `/*! ... */` blocks
//! - `//<` after code on the same line

/// A documentation comment as found in the source, markup not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    /// Comment text without comment markers, one entry per source line
    pub text: String,
    pub begin_line: u32,
    pub end_line: u32,
    /// Line of the declaration the comment documents
    pub target_line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    /// `///`
    Triple,
    /// `//!`
    Bang,
}

struct PendingLines {
    style: LineStyle,
    begin_line: u32,
    end_line: u32,
    lines: Vec<String>,
}

impl PendingLines {
    fn finish(self) -> RawComment {
        RawComment {
            text: self.lines.join("\n"),
            begin_line: self.begin_line,
            end_line: self.end_line,
            target_line: self.end_line + 1,
        }
    }
}

struct PendingBlock {
    begin_line: u32,
    lines: Vec<String>,
}

/// Scan `source` for documentation comments, in source order.
pub fn scan_source(source: &str) -> Vec<RawComment> {
    let mut comments = Vec::new();
    let mut pending_lines: Option<PendingLines> = None;
    let mut pending_block: Option<PendingBlock> = None;
    let mut in_ordinary_block = false;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx as u32 + 1;

        if in_ordinary_block {
            if let Some(end) = line.find("*/") {
                in_ordinary_block = false;
                match scan_code(&line[end + 2..]) {
                    CodeLine::Trailing(text) => comments.push(RawComment {
                        text: text.trim().to_string(),
                        begin_line: line_no,
                        end_line: line_no,
                        target_line: line_no,
                    }),
                    CodeLine::OpensBlock => in_ordinary_block = true,
                    CodeLine::Plain => {}
                }
            }
            continue;
        }

        if let Some(mut block) = pending_block.take() {
            match line.find("*/") {
                Some(end) => {
                    push_block_line(&mut block.lines, &line[..end]);
                    comments.push(RawComment {
                        text: block.lines.join("\n"),
                        begin_line: block.begin_line,
                        end_line: line_no,
                        target_line: block_target(&line[end + 2..], line_no),
                    });
                }
                None => {
                    push_block_line(&mut block.lines, line);
                    pending_block = Some(block);
                }
            }
            continue;
        }

        let trimmed = line.trim_start();

        if let Some((style, rest)) = line_doc_comment(trimmed) {
            match pending_lines.as_mut() {
                Some(run) if run.style == style && run.end_line + 1 == line_no => {
                    run.end_line = line_no;
                    run.lines.push(strip_one_space(rest).to_string());
                }
                _ => {
                    if let Some(run) = pending_lines.take() {
                        comments.push(run.finish());
                    }
                    pending_lines = Some(PendingLines {
                        style,
                        begin_line: line_no,
                        end_line: line_no,
                        lines: vec![strip_one_space(rest).to_string()],
                    });
                }
            }
            continue;
        }

        if let Some(run) = pending_lines.take() {
            comments.push(run.finish());
        }

        if let Some(rest) = block_doc_comment(trimmed) {
            match rest.find("*/") {
                Some(end) => comments.push(RawComment {
                    text: rest[..end].trim().to_string(),
                    begin_line: line_no,
                    end_line: line_no,
                    target_line: block_target(&rest[end + 2..], line_no),
                }),
                None => {
                    let mut lines = Vec::new();
                    if !rest.trim().is_empty() {
                        lines.push(rest.trim().to_string());
                    }
                    pending_block = Some(PendingBlock {
                        begin_line: line_no,
                        lines,
                    });
                }
            }
            continue;
        }

        match scan_code(line) {
            CodeLine::Trailing(text) => comments.push(RawComment {
                text: text.trim().to_string(),
                begin_line: line_no,
                end_line: line_no,
                target_line: line_no,
            }),
            CodeLine::OpensBlock => in_ordinary_block = true,
            CodeLine::Plain => {}
        }
    }

    if let Some(run) = pending_lines.take() {
        comments.push(run.finish());
    }
    // An unterminated block comment documents nothing

    comments
}

/// A block comment documents the code after `*/` on its closing line, if any.
fn block_target(after_close: &str, close_line: u32) -> u32 {
    if after_close.trim().is_empty() {
        close_line + 1
    } else {
        close_line
    }
}

fn line_doc_comment(trimmed: &str) -> Option<(LineStyle, &str)> {
    if let Some(rest) = trimmed.strip_prefix("///") {
        // "////" is a separator line, not documentation
        if rest.starts_with('/') {
            return None;
        }
        return Some((LineStyle::Triple, rest));
    }
    trimmed
        .strip_prefix("//!")
        .map(|rest| (LineStyle::Bang, rest))
}

fn block_doc_comment(trimmed: &str) -> Option<&str> {
    if let Some(rest) = trimmed.strip_prefix("/**") {
        // "/**/" is an empty ordinary comment
        if rest.starts_with('/') {
            return None;
        }
        return Some(rest);
    }
    trimmed.strip_prefix("/*!")
}

fn push_block_line(lines: &mut Vec<String>, line: &str) {
    let trimmed = line.trim_start();
    let content = match trimmed.strip_prefix('*') {
        Some(rest) => strip_one_space(rest),
        None => trimmed,
    };
    lines.push(content.trim_end().to_string());
}

fn strip_one_space(s: &str) -> &str {
    s.strip_prefix(' ').unwrap_or(s)
}

enum CodeLine<'a> {
    /// `//<` comment after code
    Trailing(&'a str),
    /// An ordinary `/*` comment left open at the end of the line
    OpensBlock,
    Plain,
}

/// Classify a line of code, skipping string and char literals and closed
/// ordinary block comments.
fn scan_code(line: &str) -> CodeLine<'_> {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => {
                let next = bytes.get(i + 1).copied();
                if b == b'"' || b == b'\'' {
                    quote = Some(b);
                } else if b == b'/' && next == Some(b'/') {
                    let code = &line[..i];
                    return match line[i + 2..].strip_prefix('<') {
                        Some(text) if !code.trim().is_empty() => CodeLine::Trailing(text),
                        _ => CodeLine::Plain,
                    };
                } else if b == b'/' && next == Some(b'*') {
                    match line[i + 2..].find("*/") {
                        // Skip to the last character of the closing marker
                        Some(end) => i += end + 3,
                        None => return CodeLine::OpensBlock,
                    }
                }
            }
        }
        i += 1;
    }

    CodeLine::Plain
}
