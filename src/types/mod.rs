use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared position of an entity in its source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file_name: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file_name: impl Into<String>, line: u32) -> Self {
        Self {
            file_name: file_name.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name, self.line)
    }
}
