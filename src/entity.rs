//! Entities produced by the structural analysis pass.
//!
//! The comment registry only needs two things from the outside world: the
//! name of an entity and a registry able to resolve its canonical name and
//! declared location. [`EntityIndex`] is the in-memory registry used by the
//! command line tool, loaded from the JSON entity list the analysis pass writes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

use crate::error::{DocError, DocResult};
use crate::types::SourceLocation;

/// A documented piece of code.
pub trait Entity {
    /// Name as written in the declaration
    fn name(&self) -> &str;

    /// True if other entities are declared on the same source line.
    fn shares_line(&self) -> bool {
        false
    }
}

/// Resolves entities to their canonical name and declared location.
pub trait EntityRegistry {
    type Entity: Entity + ?Sized;

    fn unique_name(&self, entity: &Self::Entity) -> Option<String>;

    fn location(&self, entity: &Self::Entity) -> Option<SourceLocation>;
}

/// One entity as listed by the analysis pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub shares_line: bool,
}

impl EntityRecord {
    pub fn new(name: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            unique_name: None,
            kind: None,
            file: file.into(),
            line,
            shares_line: false,
        }
    }

    pub fn with_unique_name(mut self, unique_name: impl Into<String>) -> Self {
        self.unique_name = Some(unique_name.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn sharing_line(mut self) -> Self {
        self.shares_line = true;
        self
    }
}

impl Entity for EntityRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn shares_line(&self) -> bool {
        self.shares_line
    }
}

/// In-memory entity registry.
#[derive(Debug, Default, Clone)]
pub struct EntityIndex {
    entities: Vec<EntityRecord>,
    unique_names: HashSet<String>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entity`. A repeated unique name is kept but reported, since
    /// both entities will resolve to the same name-bound comment.
    pub fn insert(&mut self, entity: EntityRecord) {
        if let Some(unique_name) = &entity.unique_name
            && !self.unique_names.insert(unique_name.clone())
        {
            warn!(
                "Duplicate entity unique name '{unique_name}' at {}:{}",
                entity.file, entity.line
            );
        }
        self.entities.push(entity);
    }

    /// Number of distinct unique names.
    pub fn unique_name_count(&self) -> usize {
        self.unique_names.len()
    }

    /// Load the entity list written by the analysis pass.
    pub fn load(path: &Path) -> DocResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DocError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| DocError::EntitiesLoad {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<EntityRecord> = serde_json::from_str(json)?;
        Ok(records.into_iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<EntityRecord> for EntityIndex {
    fn from_iter<I: IntoIterator<Item = EntityRecord>>(iter: I) -> Self {
        let mut index = EntityIndex::new();
        for entity in iter {
            index.insert(entity);
        }
        index
    }
}

impl EntityRegistry for EntityIndex {
    type Entity = EntityRecord;

    fn unique_name(&self, entity: &EntityRecord) -> Option<String> {
        entity.unique_name.clone()
    }

    fn location(&self, entity: &EntityRecord) -> Option<SourceLocation> {
        if entity.line == 0 {
            return None;
        }
        Some(SourceLocation::new(entity.file.clone(), entity.line))
    }
}
