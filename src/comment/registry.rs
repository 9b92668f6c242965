//! Shared store of documentation comments for one run.
//!
//! Comments are registered by the parallel scanning workers and looked up
//! afterwards, once per parsed entity. All registrations must be complete
//! before the first lookup; the registry does not enforce this ordering.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Comment, CommentId};
use crate::entity::{Entity, EntityRegistry};
use crate::error::{CommentError, CommentResult};

/// Thread-safe map from [`CommentId`] to [`Comment`].
#[derive(Debug, Default)]
pub struct CommentRegistry {
    comments: Mutex<BTreeMap<CommentId, Arc<Comment>>>,
}

impl CommentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `comment` under `id`.
    ///
    /// Fails with [`CommentError::DuplicateComment`] if a comment is already
    /// registered under an equal identifier. The first comment is kept.
    pub fn try_register(&self, id: CommentId, comment: Comment) -> CommentResult<()> {
        let mut comments = self.comments.lock();
        if comments.contains_key(&id) {
            return Err(CommentError::DuplicateComment { id });
        }
        comments.insert(id, Arc::new(comment));
        Ok(())
    }

    /// Register `comment` under `id`, returning whether it was inserted.
    pub fn register(&self, id: CommentId, comment: Comment) -> bool {
        self.try_register(id, comment).is_ok()
    }

    /// Find the comment documenting `entity`.
    ///
    /// Tries in order: the canonical name, the declared location, and for
    /// entities sharing their line, the inline location. The first match wins.
    pub fn lookup<R>(&self, registry: &R, entity: &R::Entity) -> Option<Arc<Comment>>
    where
        R: EntityRegistry + ?Sized,
    {
        let by_name = registry.unique_name(entity).map(CommentId::name);

        let location = registry.location(entity);
        let by_location = location
            .as_ref()
            .and_then(|loc| CommentId::location(&loc.file_name, loc.line).ok());
        let by_inline = location
            .as_ref()
            .filter(|_| entity.shares_line())
            .and_then(|loc| CommentId::inline_location(&loc.file_name, loc.line, entity.name()).ok());

        let comments = self.comments.lock();
        [by_name, by_location, by_inline]
            .iter()
            .flatten()
            .find_map(|id| comments.get(id).cloned())
    }

    /// Comment registered under exactly `id`.
    pub fn get(&self, id: &CommentId) -> Option<Arc<Comment>> {
        self.comments.lock().get(id).cloned()
    }

    /// Snapshot of all registered identifiers, in key order.
    pub fn ids(&self) -> Vec<CommentId> {
        self.comments.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.comments.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.lock().is_empty()
    }
}
