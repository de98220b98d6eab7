//! Blog post store

use uuid::Uuid;

use super::{Collection, StoreResult};
use crate::config::Config;
use crate::models::{BlogPost, BlogPostPatch, Entity};
use crate::storage::JsonPersistence;

/// Store for blog posts
pub struct BlogStore {
    collection: Collection<BlogPost>,
}

impl BlogStore {
    /// Open the store, loading any existing posts from disk
    pub fn open(config: &Config) -> StoreResult<Self> {
        let persistence = JsonPersistence::new(config.store_path(BlogPost::STORE));
        Ok(Self {
            collection: Collection::open(persistence)?,
        })
    }

    /// Add a new post
    pub fn add_post(&mut self, post: BlogPost) -> StoreResult<()> {
        self.collection.add(post)
    }

    /// Apply a partial update to an existing post
    pub fn update_post(&mut self, id: Uuid, patch: BlogPostPatch) -> StoreResult<BlogPost> {
        self.collection.update(id, |post| patch.apply(post))
    }

    /// Delete a post. Returns whether a post was removed.
    pub fn delete_post(&mut self, id: Uuid) -> StoreResult<bool> {
        self.collection.delete(id)
    }

    /// Get a post by id
    pub fn get_post(&self, id: Uuid) -> Option<&BlogPost> {
        self.collection.get(id)
    }

    /// All posts, most-recent-first
    pub fn posts(&self) -> &[BlogPost] {
        self.collection.list()
    }

    /// Published posts only, most-recent-first
    pub fn published(&self) -> Vec<&BlogPost> {
        self.collection.list().iter().filter(|p| p.published).collect()
    }

    /// Number of posts
    pub fn post_count(&self) -> usize {
        self.collection.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_and_get_post() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = BlogStore::open(&test_config(&temp_dir)).unwrap();

        let mut post = BlogPost::new("Hello");
        post.set_excerpt("An intro");
        let id = post.id;
        store.add_post(post).unwrap();

        let retrieved = store.get_post(id).unwrap();
        assert_eq!(retrieved.title, "Hello");
        assert_eq!(retrieved.excerpt, "An intro");
    }

    #[test]
    fn test_update_post_merges() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = BlogStore::open(&test_config(&temp_dir)).unwrap();

        let mut post = BlogPost::new("Hello");
        post.set_content("Body");
        let id = post.id;
        store.add_post(post).unwrap();

        let patch = BlogPostPatch {
            excerpt: Some("Summary".to_string()),
            ..Default::default()
        };
        let updated = store.update_post(id, patch).unwrap();

        assert_eq!(updated.excerpt, "Summary");
        assert_eq!(updated.content, "Body");
        assert_eq!(updated.title, "Hello");
        assert_eq!(updated.id, id);
    }

    #[test]
    fn test_published_filter() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = BlogStore::open(&test_config(&temp_dir)).unwrap();

        let draft = BlogPost::new("Draft");
        let mut live = BlogPost::new("Live");
        live.published = true;
        store.add_post(draft).unwrap();
        store.add_post(live).unwrap();

        let published = store.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].title, "Live");
    }

    #[test]
    fn test_posts_persist_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store = BlogStore::open(&config).unwrap();
            store.add_post(BlogPost::new("Persistent")).unwrap();
        }

        let store = BlogStore::open(&config).unwrap();
        assert_eq!(store.post_count(), 1);
        assert_eq!(store.posts()[0].title, "Persistent");
    }
}
