//! Social post store

use chrono::NaiveDate;
use uuid::Uuid;

use super::{Collection, StoreResult};
use crate::config::Config;
use crate::models::{Entity, PostStatus, SocialPlatform, SocialPost, SocialPostPatch};
use crate::storage::JsonPersistence;

/// Store for social media posts
pub struct SocialStore {
    collection: Collection<SocialPost>,
}

impl SocialStore {
    /// Open the store, loading any existing posts from disk
    pub fn open(config: &Config) -> StoreResult<Self> {
        let persistence = JsonPersistence::new(config.store_path(SocialPost::STORE));
        Ok(Self {
            collection: Collection::open(persistence)?,
        })
    }

    /// Add a new post
    pub fn add_post(&mut self, post: SocialPost) -> StoreResult<()> {
        self.collection.add(post)
    }

    /// Apply a partial update to an existing post
    pub fn update_post(&mut self, id: Uuid, patch: SocialPostPatch) -> StoreResult<SocialPost> {
        self.collection.update(id, |post| patch.apply(post))
    }

    /// Delete a post. Returns whether a post was removed.
    pub fn delete_post(&mut self, id: Uuid) -> StoreResult<bool> {
        self.collection.delete(id)
    }

    /// Get a post by id
    pub fn get_post(&self, id: Uuid) -> Option<&SocialPost> {
        self.collection.get(id)
    }

    /// All posts, most-recent-first
    pub fn posts(&self) -> &[SocialPost] {
        self.collection.list()
    }

    /// Posts for one platform, most-recent-first
    pub fn by_platform(&self, platform: SocialPlatform) -> Vec<&SocialPost> {
        self.collection
            .list()
            .iter()
            .filter(|p| p.platform == platform)
            .collect()
    }

    /// Posts in one lifecycle state, most-recent-first
    pub fn by_status(&self, status: PostStatus) -> Vec<&SocialPost> {
        self.collection
            .list()
            .iter()
            .filter(|p| p.status == status)
            .collect()
    }

    /// Scheduled posts bucketed by calendar day (UTC), soonest first.
    ///
    /// Posts within a day keep their relative scheduled order.
    pub fn upcoming(&self) -> Vec<(NaiveDate, Vec<&SocialPost>)> {
        let mut scheduled: Vec<&SocialPost> = self
            .collection
            .list()
            .iter()
            .filter(|p| p.scheduled_date.is_some() && p.status == PostStatus::Scheduled)
            .collect();
        scheduled.sort_by_key(|p| p.scheduled_date);

        let mut buckets: Vec<(NaiveDate, Vec<&SocialPost>)> = Vec::new();
        for post in scheduled {
            let day = post.scheduled_date.unwrap_or_default().date_naive();
            match buckets.last_mut() {
                Some((current, posts)) if *current == day => posts.push(post),
                _ => buckets.push((day, vec![post])),
            }
        }
        buckets
    }

    /// Number of posts
    pub fn post_count(&self) -> usize {
        self.collection.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_and_list_most_recent_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = SocialStore::open(&test_config(&temp_dir)).unwrap();

        let mut first = SocialPost::new(SocialPlatform::Twitter);
        first.set_caption("first");
        let mut second = SocialPost::new(SocialPlatform::Twitter);
        second.set_caption("second");

        store.add_post(first).unwrap();
        store.add_post(second).unwrap();

        let captions: Vec<_> = store.posts().iter().map(|p| p.caption.as_str()).collect();
        assert_eq!(captions, vec!["second", "first"]);
    }

    #[test]
    fn test_by_platform_and_status() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = SocialStore::open(&test_config(&temp_dir)).unwrap();

        let insta = SocialPost::new(SocialPlatform::Instagram);
        let mut tweet = SocialPost::new(SocialPlatform::Twitter);
        tweet.status = PostStatus::Published;
        store.add_post(insta).unwrap();
        store.add_post(tweet).unwrap();

        assert_eq!(store.by_platform(SocialPlatform::Instagram).len(), 1);
        assert_eq!(store.by_platform(SocialPlatform::Tiktok).len(), 0);
        assert_eq!(store.by_status(PostStatus::Published).len(), 1);
        assert_eq!(store.by_status(PostStatus::Draft).len(), 1);
    }

    #[test]
    fn test_upcoming_buckets_by_day() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = SocialStore::open(&test_config(&temp_dir)).unwrap();

        let mut monday_am = SocialPost::new(SocialPlatform::Twitter);
        monday_am.schedule(Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap());
        let mut monday_pm = SocialPost::new(SocialPlatform::Facebook);
        monday_pm.schedule(Utc.with_ymd_and_hms(2025, 6, 2, 17, 0, 0).unwrap());
        let mut friday = SocialPost::new(SocialPlatform::Linkedin);
        friday.schedule(Utc.with_ymd_and_hms(2025, 6, 6, 12, 0, 0).unwrap());
        let unscheduled = SocialPost::new(SocialPlatform::Instagram);

        store.add_post(friday).unwrap();
        store.add_post(monday_pm).unwrap();
        store.add_post(monday_am).unwrap();
        store.add_post(unscheduled).unwrap();

        let upcoming = store.upcoming();
        assert_eq!(upcoming.len(), 2);

        let (monday, monday_posts) = &upcoming[0];
        assert_eq!(*monday, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(monday_posts.len(), 2);
        assert_eq!(monday_posts[0].platform, SocialPlatform::Twitter);
        assert_eq!(monday_posts[1].platform, SocialPlatform::Facebook);

        let (friday_date, friday_posts) = &upcoming[1];
        assert_eq!(*friday_date, NaiveDate::from_ymd_opt(2025, 6, 6).unwrap());
        assert_eq!(friday_posts.len(), 1);
    }

    #[test]
    fn test_update_post_merges() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = SocialStore::open(&test_config(&temp_dir)).unwrap();

        let mut post = SocialPost::new(SocialPlatform::Instagram);
        post.set_caption("Caption");
        post.set_hashtags(vec!["tag".to_string()]);
        let id = post.id;
        store.add_post(post).unwrap();

        let patch = SocialPostPatch {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        let updated = store.update_post(id, patch).unwrap();

        assert_eq!(updated.status, PostStatus::Published);
        assert_eq!(updated.caption, "Caption");
        assert_eq!(updated.hashtags, vec!["tag"]);
    }

    #[test]
    fn test_posts_persist_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store = SocialStore::open(&config).unwrap();
            store
                .add_post(SocialPost::new(SocialPlatform::Tiktok))
                .unwrap();
        }

        let store = SocialStore::open(&config).unwrap();
        assert_eq!(store.post_count(), 1);
        assert_eq!(store.posts()[0].platform, SocialPlatform::Tiktok);
    }
}
