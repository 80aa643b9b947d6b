//! Identity cache for fetched relationships
//!
//! Stores may keep fetched records keyed by id to avoid re-reading them within
//! a unit of work. The cache is injected by the caller, and every write through
//! the store invalidates the affected id. [`NoCache`] is the default.

use crate::ids::RelationshipId;
use crate::relationship::Relationship;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A cache of relationships keyed by id
pub trait RelationshipCache {
    /// Get a cached copy, if any
    fn get(&self, id: RelationshipId) -> Option<Relationship>;

    /// Remember a fetched record
    fn insert(&self, relationship: &Relationship);

    /// Forget a record after it was written or deleted
    fn invalidate(&self, id: RelationshipId);

    /// Forget everything
    fn clear(&self);
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl RelationshipCache for NoCache {
    fn get(&self, _id: RelationshipId) -> Option<Relationship> {
        None
    }

    fn insert(&self, _relationship: &Relationship) {}

    fn invalidate(&self, _id: RelationshipId) {}

    fn clear(&self) {}
}

/// In-memory identity map of fetched relationships
#[derive(Debug, Default)]
pub struct IdentityCache {
    entries: Mutex<HashMap<RelationshipId, Relationship>>,
}

impl IdentityCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry behind,
    // so a poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<RelationshipId, Relationship>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RelationshipCache for IdentityCache {
    fn get(&self, id: RelationshipId) -> Option<Relationship> {
        self.lock().get(&id).cloned()
    }

    fn insert(&self, relationship: &Relationship) {
        if let Some(id) = relationship.id() {
            self.lock().insert(id, relationship.clone());
        }
    }

    fn invalidate(&self, id: RelationshipId) {
        self.lock().remove(&id);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: i64, name: &str) -> Relationship {
        Relationship::from_parts(
            RelationshipId::from_value(id),
            name.to_string(),
            name.to_lowercase(),
            0,
            0,
            Vec::new(),
        )
    }

    #[test]
    fn test_no_cache_never_hits() {
        let cache = NoCache;
        cache.insert(&stored(1, "Authors"));
        assert!(cache.get(RelationshipId::from_value(1)).is_none());
    }

    #[test]
    fn test_identity_cache_round_trip() {
        let cache = IdentityCache::new();
        cache.insert(&stored(1, "Authors"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(RelationshipId::from_value(1)).map(|r| r.name().to_string()), Some("Authors".to_string()));

        cache.invalidate(RelationshipId::from_value(1));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unsaved_records_are_not_cached() {
        let cache = IdentityCache::new();
        cache.insert(&Relationship::new());
        assert!(cache.is_empty());
    }
}
