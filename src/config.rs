//! Configuration module for the documentation generator.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DOCWEAVE_` and use double
//! underscores to separate nested levels:
//! - `DOCWEAVE_INPUT__PARALLEL_THREADS=8` sets `input.parallel_threads`
//! - `DOCWEAVE_OUTPUT__TAB_WIDTH=2` sets `output.tab_width`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::comment::SectionKind;
use crate::error::{DocError, DocResult};

const CONFIG_DIR: &str = ".docweave";
const ENV_PREFIX: &str = "DOCWEAVE_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Source file selection and scanning
    #[serde(default)]
    pub input: InputConfig,

    /// Comment syntax
    #[serde(default)]
    pub comment: CommentConfig,

    /// Generated documentation
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InputConfig {
    /// Extensions of the files scanned for comments
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Extensions that are never scanned, "." matches files without extension
    #[serde(default)]
    pub blacklist_extensions: Vec<String>,

    /// Files that are never scanned, relative to the walked directory
    #[serde(default)]
    pub blacklist_files: Vec<String>,

    /// Directories that are never walked, relative to the walked directory
    #[serde(default)]
    pub blacklist_dirs: Vec<String>,

    /// Skip files and directories starting with a dot
    #[serde(default = "default_true")]
    pub blacklist_dotfiles: bool,

    /// Apply the blacklists to files given explicitly too
    #[serde(default = "default_false")]
    pub force_blacklist: bool,

    /// Only document entities that have a documentation comment
    #[serde(default = "default_true")]
    pub require_comment: bool,

    /// Number of parallel threads for scanning
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CommentConfig {
    /// Character introducing a command, e.g. `\effects`
    #[serde(default = "default_command_character")]
    pub command_character: String,

    /// Renamed commands, keyed by section or command kind
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    /// Section headings, keyed by section kind
    #[serde(default)]
    pub section_names: BTreeMap<String, String>,

    /// Name shown for entities whose name is hidden
    #[serde(default = "default_hidden_name")]
    pub hidden_name: String,

    /// Spaces per tab in code blocks
    #[serde(default = "default_tab_width")]
    pub tab_width: u32,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_source_extensions() -> Vec<String> {
    ["h", "hpp", "h++", "hxx"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}
fn default_command_character() -> String {
    "\\".to_string()
}
fn default_hidden_name() -> String {
    "'hidden'".to_string()
}
fn default_tab_width() -> u32 {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            input: InputConfig::default(),
            comment: CommentConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source_extensions: default_source_extensions(),
            blacklist_extensions: Vec::new(),
            blacklist_files: Vec::new(),
            blacklist_dirs: Vec::new(),
            blacklist_dotfiles: true,
            force_blacklist: false,
            require_comment: true,
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            command_character: default_command_character(),
            commands: BTreeMap::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            section_names: BTreeMap::new(),
            hidden_name: default_hidden_name(),
            tab_width: default_tab_width(),
        }
    }
}

impl CommentConfig {
    /// The command character as a `char`.
    pub fn command_char(&self) -> DocResult<char> {
        let mut chars = self.command_character.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_alphanumeric() && !c.is_whitespace() => Ok(c),
            _ => Err(DocError::ConfigError {
                reason: format!(
                    "comment.command_character must be a single punctuation character, got '{}'",
                    self.command_character
                ),
            }),
        }
    }
}

impl OutputConfig {
    /// Heading for a section, honoring overrides.
    pub fn section_title(&self, kind: SectionKind) -> &str {
        self.section_names
            .get(kind.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_title())
    }

    /// Reject overrides for unknown sections and for brief/details.
    pub fn validate(&self) -> DocResult<()> {
        for key in self.section_names.keys() {
            match key.parse::<SectionKind>() {
                Ok(SectionKind::Brief | SectionKind::Details) => {
                    return Err(DocError::ReservedSectionName {
                        section: key.clone(),
                    });
                }
                Ok(_) => {}
                Err(_) => {
                    return Err(DocError::ConfigError {
                        reason: format!("unknown section '{key}' in output.section_names"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join("settings.toml"));

        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref().to_path_buf())
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscore stays
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find the workspace config by looking for a .docweave directory,
    /// from the current directory up to the root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join("settings.toml"))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join("settings.toml");

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = format!(
            r#"# docweave configuration file

# Version of the configuration schema
version = 1

# Global debug mode
debug = false

[input]
# Extensions of the files scanned for documentation comments
source_extensions = ["h", "hpp", "h++", "hxx"]

# Extensions that are never scanned ("." for files without extension)
blacklist_extensions = []

# Files and directories that are never scanned, relative to the walked directory
blacklist_files = []
blacklist_dirs = []

# Skip dotfiles and dot-directories
blacklist_dotfiles = true

# Apply the blacklists to files given explicitly on the command line
force_blacklist = false

# Only document entities that have a documentation comment
require_comment = true

# Number of parallel threads for scanning (defaults to CPU count)
# parallel_threads = {}

[comment]
# Character introducing commands such as \effects or \exclude
command_character = "\\"

# Rename commands, e.g. requires = "pre"
[comment.commands]

[output]
# Name shown for hidden entities
hidden_name = "'hidden'"

# Spaces per tab in code blocks
tab_width = 4

# Override section headings, e.g. requires = "Preconditions"
[output.section_names]
"#,
            num_cpus::get()
        );

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }

    /// Check the parts of the configuration figment cannot type-check
    pub fn validate(&self) -> DocResult<()> {
        if self.input.parallel_threads == 0 {
            return Err(DocError::ConfigError {
                reason: "input.parallel_threads must be at least 1".to_string(),
            });
        }
        self.comment.command_char()?;
        self.output.validate()
    }
}
