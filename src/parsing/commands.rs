//! Commands recognized inside documentation comments.

use std::collections::HashMap;
use std::fmt;

use crate::comment::SectionKind;
use crate::config::CommentConfig;
use crate::error::{DocError, DocResult};

/// Commands that do not start a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// Suppress documentation of the entity
    Exclude,
    /// Override the canonical name of the entity
    UniqueName,
    /// Replace the synopsis shown for the entity
    Synopsis,
    /// Replace only the return type in the synopsis
    SynopsisReturn,
    /// Add the entity to a member group, with an optional heading
    Group,
    /// Assign the entity to a module
    Module,
    /// Start a named section in the synopsis of the parent
    OutputSection,
    /// Bind the comment to an entity by name instead of position
    Entity,
    /// Bind the comment to the current file
    File,
    /// Inline comment for a parameter
    Param,
    /// Inline comment for a template parameter
    TParam,
    /// Inline comment for a base class
    Base,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 12] = [
        DirectiveKind::Exclude,
        DirectiveKind::UniqueName,
        DirectiveKind::Synopsis,
        DirectiveKind::SynopsisReturn,
        DirectiveKind::Group,
        DirectiveKind::Module,
        DirectiveKind::OutputSection,
        DirectiveKind::Entity,
        DirectiveKind::File,
        DirectiveKind::Param,
        DirectiveKind::TParam,
        DirectiveKind::Base,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::Exclude => "exclude",
            DirectiveKind::UniqueName => "unique_name",
            DirectiveKind::Synopsis => "synopsis",
            DirectiveKind::SynopsisReturn => "synopsis_return",
            DirectiveKind::Group => "group",
            DirectiveKind::Module => "module",
            DirectiveKind::OutputSection => "output_section",
            DirectiveKind::Entity => "entity",
            DirectiveKind::File => "file",
            DirectiveKind::Param => "param",
            DirectiveKind::TParam => "tparam",
            DirectiveKind::Base => "base",
        }
    }

    /// Inline directives document a member of the entity, not the entity itself
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            DirectiveKind::Param | DirectiveKind::TParam | DirectiveKind::Base
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Section(SectionKind),
    Directive(DirectiveKind),
}

impl Command {
    /// Default command name, also the key used for renames in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Section(kind) => kind.as_str(),
            Command::Directive(kind) => kind.as_str(),
        }
    }

    fn all() -> impl Iterator<Item = Command> {
        SectionKind::ALL
            .into_iter()
            .map(Command::Section)
            .chain(DirectiveKind::ALL.into_iter().map(Command::Directive))
    }

    fn from_key(key: &str) -> Option<Command> {
        Command::all().find(|command| command.as_str() == key)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from command names to commands.
#[derive(Debug, Clone)]
pub struct CommandTable {
    command_char: char,
    commands: HashMap<String, Command>,
}

impl CommandTable {
    /// Table with default command names and the configured renames applied.
    pub fn new(config: &CommentConfig) -> DocResult<Self> {
        let mut table = Self {
            command_char: config.command_char()?,
            commands: Command::all()
                .map(|command| (command.as_str().to_string(), command))
                .collect(),
        };

        for (key, name) in &config.commands {
            let command = Command::from_key(key)
                .ok_or_else(|| DocError::UnknownCommand { name: key.clone() })?;
            table.set_command(command, name.clone())?;
        }

        Ok(table)
    }

    /// Rename `command`, dropping its previous name.
    ///
    /// The table is left unchanged if `name` belongs to another command.
    pub fn set_command(&mut self, command: Command, name: String) -> DocResult<()> {
        if self
            .commands
            .get(&name)
            .is_some_and(|existing| *existing != command)
        {
            return Err(DocError::CommandInUse { name });
        }

        self.commands.retain(|_, existing| *existing != command);
        self.commands.insert(name, command);
        Ok(())
    }

    pub fn command_char(&self) -> char {
        self.command_char
    }

    pub fn get(&self, name: &str) -> Option<Command> {
        self.commands.get(name).copied()
    }

    /// Split a comment line into command and argument if it starts with a command.
    ///
    /// Returns `Err(name)` for a command-like word that names no command.
    pub fn parse_line<'a>(&self, line: &'a str) -> Option<Result<(Command, &'a str), &'a str>> {
        let rest = line.trim_start().strip_prefix(self.command_char)?;
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }

        let (name, argument) = rest.split_at(end);
        Some(match self.get(name) {
            Some(command) => Ok((command, argument.trim())),
            None => Err(name),
        })
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self {
            command_char: '\\',
            commands: Command::all()
                .map(|command| (command.as_str().to_string(), command))
                .collect(),
        }
    }
}
