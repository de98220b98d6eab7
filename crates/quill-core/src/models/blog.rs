//! Blog post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;

/// A blog post, draft or published
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    /// Unique identifier
    pub id: Uuid,
    /// Post title
    pub title: String,
    /// Full body content (markdown)
    pub content: String,
    /// Short summary shown in listings
    pub excerpt: String,
    /// Optional cover image URL
    pub cover_image: Option<String>,
    /// When this post was created
    pub created_at: DateTime<Utc>,
    /// When this post was last updated
    pub updated_at: DateTime<Utc>,
    /// Whether the post is published
    pub published: bool,
    /// Optional publication schedule
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Template the post was drafted from
    pub template: Option<String>,
    /// SEO keywords
    pub keywords: Vec<String>,
    /// Intended audience
    pub target_audience: Option<String>,
}

impl BlogPost {
    /// Create a new draft post with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: String::new(),
            excerpt: String::new(),
            cover_image: None,
            created_at: now,
            updated_at: now,
            published: false,
            scheduled_date: None,
            template: None,
            keywords: Vec::new(),
            target_audience: None,
        }
    }

    /// Update the body content
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.touch();
    }

    /// Update the excerpt
    pub fn set_excerpt(&mut self, excerpt: impl Into<String>) {
        self.excerpt = excerpt.into();
        self.touch();
    }

    /// Set or clear the cover image
    pub fn set_cover_image(&mut self, url: Option<String>) {
        self.cover_image = url;
        self.touch();
    }

    /// Set all keywords (replacing existing)
    pub fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
        self.touch();
    }

    /// Set or clear the publication schedule
    pub fn set_scheduled_date(&mut self, date: Option<DateTime<Utc>>) {
        self.scheduled_date = date;
        self.touch();
    }
}

impl Entity for BlogPost {
    const STORE: &'static str = "blog";
    const COLLECTION: &'static str = "blog_posts";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self) {
        self.updated_at = self.updated_at.max(Utc::now());
    }
}

/// Partial update for a blog post.
///
/// Fields left as `None` are untouched by the merge. For optional entity
/// fields, `Some(None)` clears the value. Identity and `created_at` are not
/// part of the patch and can never change.
#[derive(Debug, Clone, Default)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<Option<String>>,
    pub published: Option<bool>,
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
    pub template: Option<Option<String>>,
    pub keywords: Option<Vec<String>>,
    pub target_audience: Option<Option<String>>,
}

impl BlogPostPatch {
    /// Shallow-merge this patch into the post
    pub fn apply(self, post: &mut BlogPost) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(cover_image) = self.cover_image {
            post.cover_image = cover_image;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
        if let Some(scheduled_date) = self.scheduled_date {
            post.scheduled_date = scheduled_date;
        }
        if let Some(template) = self.template {
            post.template = template;
        }
        if let Some(keywords) = self.keywords {
            post.keywords = keywords;
        }
        if let Some(target_audience) = self.target_audience {
            post.target_audience = target_audience;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post() {
        let post = BlogPost::new("First Post");
        assert_eq!(post.title, "First Post");
        assert!(post.content.is_empty());
        assert!(!post.published);
        assert!(post.cover_image.is_none());
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_touch_is_monotonic() {
        let mut post = BlogPost::new("Post");
        let first = post.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(10));
        post.touch();
        assert!(post.updated_at > first);

        let second = post.updated_at;
        post.touch();
        assert!(post.updated_at >= second);
    }

    #[test]
    fn test_set_content_refreshes_updated_at() {
        let mut post = BlogPost::new("Post");
        let original = post.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(10));
        post.set_content("Body text");
        assert_eq!(post.content, "Body text");
        assert!(post.updated_at > original);
        assert_eq!(post.created_at, original);
    }

    #[test]
    fn test_patch_merges_only_given_fields() {
        let mut post = BlogPost::new("Original title");
        post.set_content("Original content");
        post.set_excerpt("Original excerpt");

        let patch = BlogPostPatch {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        patch.apply(&mut post);

        assert_eq!(post.title, "New title");
        assert_eq!(post.content, "Original content");
        assert_eq!(post.excerpt, "Original excerpt");
    }

    #[test]
    fn test_patch_clears_optional_field() {
        let mut post = BlogPost::new("Post");
        post.set_cover_image(Some("https://example.com/cover.png".to_string()));

        let patch = BlogPostPatch {
            cover_image: Some(None),
            ..Default::default()
        };
        patch.apply(&mut post);

        assert!(post.cover_image.is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut post = BlogPost::new("Post");
        post.set_keywords(vec!["rust".to_string(), "writing".to_string()]);
        let json = serde_json::to_string(&post).unwrap();
        let deserialized: BlogPost = serde_json::from_str(&json).unwrap();
        assert_eq!(post, deserialized);
    }
}
