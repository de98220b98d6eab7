//! Generic entity collection
//!
//! The CRUD core shared by the typed stores: an ordered in-memory table
//! keyed by id, loaded from its durable mirror on open and rewritten after
//! every mutation.

use tracing::warn;
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::models::Entity;
use crate::storage::JsonPersistence;

/// An ordered in-memory collection of entities of one type.
///
/// Insertion order is most-recent-first: `add` places the new entity at the
/// front, and `list` returns entities in that order, stable across reads
/// absent mutation.
pub struct Collection<T: Entity> {
    entities: Vec<T>,
    persistence: JsonPersistence,
}

impl<T: Entity> Collection<T> {
    /// Open the collection, loading any existing entities from disk
    pub fn open(persistence: JsonPersistence) -> StoreResult<Self> {
        let entities = persistence.load()?;
        Ok(Self {
            entities,
            persistence,
        })
    }

    /// Add a new entity at the front of the collection.
    ///
    /// The id must not already exist; a duplicate is a caller error.
    pub fn add(&mut self, entity: T) -> StoreResult<()> {
        let id = entity.id();
        if self.get(id).is_some() {
            return Err(StoreError::DuplicateId { id });
        }
        self.entities.insert(0, entity);
        self.persist()
    }

    /// Mutate an existing entity in place and refresh its `updated_at`.
    ///
    /// Returns the updated entity. Errors with `NotFound` if the id is
    /// absent; never creates.
    pub fn update(&mut self, id: Uuid, mutate: impl FnOnce(&mut T)) -> StoreResult<T> {
        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(StoreError::NotFound { id })?;
        mutate(entity);
        entity.touch();
        let updated = entity.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Remove an entity. Idempotent: a missing id is a no-op, not an
    /// error. Returns whether an entity was removed.
    pub fn delete(&mut self, id: Uuid) -> StoreResult<bool> {
        let before = self.entities.len();
        self.entities.retain(|e| e.id() != id);
        if self.entities.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Get an entity by id
    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// All entities, most-recent-first
    pub fn list(&self) -> &[T] {
        &self.entities
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Rewrite the durable mirror from the in-memory state.
    ///
    /// A write failure is logged and returned, but the in-memory mutation
    /// that preceded it is not rolled back.
    fn persist(&self) -> StoreResult<()> {
        if let Err(e) = self.persistence.save(&self.entities) {
            warn!(store = T::STORE, error = %e, "durable mirror write failed; in-memory state unchanged");
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlogPost, Entity};
    use tempfile::TempDir;

    fn open_collection(temp_dir: &TempDir) -> Collection<BlogPost> {
        let persistence =
            JsonPersistence::new(temp_dir.path().join(format!("{}.json", BlogPost::STORE)));
        Collection::open(persistence).unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut collection = open_collection(&temp_dir);

        let post = BlogPost::new("Post");
        let id = post.id;
        collection.add(post).unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(id).unwrap().title, "Post");
    }

    #[test]
    fn test_add_duplicate_id_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut collection = open_collection(&temp_dir);

        let post = BlogPost::new("Post");
        collection.add(post.clone()).unwrap();

        let result = collection.add(post);
        assert!(matches!(result, Err(StoreError::DuplicateId { .. })));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_list_is_most_recent_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut collection = open_collection(&temp_dir);

        let first = BlogPost::new("first");
        let second = BlogPost::new("second");
        collection.add(first.clone()).unwrap();
        collection.add(second.clone()).unwrap();

        let titles: Vec<_> = collection.list().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn test_update_preserves_identity_and_other_fields() {
        let temp_dir = TempDir::new().unwrap();
        let mut collection = open_collection(&temp_dir);

        let mut post = BlogPost::new("Post");
        post.set_excerpt("Summary");
        let id = post.id;
        let created = post.created_at;
        collection.add(post).unwrap();

        let updated = collection
            .update(id, |p| p.content = "New body".to_string())
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.content, "New body");
        assert_eq!(updated.excerpt, "Summary");
    }

    #[test]
    fn test_update_refreshes_updated_at_monotonically() {
        let temp_dir = TempDir::new().unwrap();
        let mut collection = open_collection(&temp_dir);

        let post = BlogPost::new("Post");
        let id = post.id;
        collection.add(post).unwrap();

        let first = collection.update(id, |p| p.content = "one".to_string()).unwrap();
        let second = collection.update(id, |p| p.content = "two".to_string()).unwrap();
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut collection = open_collection(&temp_dir);

        let result = collection.update(Uuid::new_v4(), |p| p.content = "x".to_string());
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let mut collection = open_collection(&temp_dir);

        let post = BlogPost::new("Post");
        let id = post.id;
        collection.add(post).unwrap();

        assert!(collection.delete(id).unwrap());
        assert!(!collection.delete(id).unwrap());
        assert!(!collection.delete(Uuid::new_v4()).unwrap());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();

        let id;
        {
            let mut collection = open_collection(&temp_dir);
            let mut post = BlogPost::new("Persistent");
            post.set_content("Body");
            id = post.id;
            collection.add(post).unwrap();
        }

        let collection = open_collection(&temp_dir);
        assert_eq!(collection.len(), 1);
        let post = collection.get(id).unwrap();
        assert_eq!(post.title, "Persistent");
        assert_eq!(post.content, "Body");
    }

    #[test]
    fn test_mirror_failure_reports_but_keeps_memory() {
        let temp_dir = TempDir::new().unwrap();

        // Block directory creation by putting a file where the store's
        // parent directory should be
        let blocker = temp_dir.path().join("data");
        std::fs::write(&blocker, b"").unwrap();

        let persistence = JsonPersistence::new(blocker.join("blog.json"));
        let mut collection: Collection<BlogPost> = Collection::open(persistence).unwrap();

        let post = BlogPost::new("Post");
        let id = post.id;
        let result = collection.add(post);

        assert!(matches!(result, Err(StoreError::Storage(_))));
        // The in-memory mutation stands
        assert_eq!(collection.len(), 1);
        assert!(collection.get(id).is_some());
    }
}
