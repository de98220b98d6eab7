//! Social media post model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Entity;

/// Target platform for a social post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Linkedin,
    Tiktok,
    Twitter,
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocialPlatform::Instagram => write!(f, "instagram"),
            SocialPlatform::Facebook => write!(f, "facebook"),
            SocialPlatform::Linkedin => write!(f, "linkedin"),
            SocialPlatform::Tiktok => write!(f, "tiktok"),
            SocialPlatform::Twitter => write!(f, "twitter"),
        }
    }
}

/// Unrecognized platform name
#[derive(Debug, Error)]
#[error("unknown platform '{0}' (expected instagram, facebook, linkedin, tiktok, or twitter)")]
pub struct ParsePlatformError(String);

impl FromStr for SocialPlatform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "instagram" => Ok(SocialPlatform::Instagram),
            "facebook" => Ok(SocialPlatform::Facebook),
            "linkedin" => Ok(SocialPlatform::Linkedin),
            "tiktok" => Ok(SocialPlatform::Tiktok),
            "twitter" => Ok(SocialPlatform::Twitter),
            _ => Err(ParsePlatformError(s.to_string())),
        }
    }
}

/// Kind of media attached to a post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// Lifecycle state of a social post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Scheduled => write!(f, "scheduled"),
            PostStatus::Published => write!(f, "published"),
        }
    }
}

/// Unrecognized post status name
#[derive(Debug, Error)]
#[error("unknown status '{0}' (expected draft, scheduled, or published)")]
pub struct ParseStatusError(String);

impl FromStr for PostStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "scheduled" => Ok(PostStatus::Scheduled),
            "published" => Ok(PostStatus::Published),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A social media post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialPost {
    /// Unique identifier
    pub id: Uuid,
    /// Target platform
    pub platform: SocialPlatform,
    /// Post body content
    pub content: String,
    /// Caption shown with the media
    pub caption: String,
    /// Hashtags without the leading '#'
    pub hashtags: Vec<String>,
    /// When the post should go out
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Attached media URL
    pub media_url: Option<String>,
    /// Kind of attached media
    pub media_type: Option<MediaType>,
    /// Template the post was drafted from
    pub template: Option<String>,
    /// Lifecycle state
    pub status: PostStatus,
    /// When this post was created
    pub created_at: DateTime<Utc>,
    /// When this post was last updated
    pub updated_at: DateTime<Utc>,
    /// Brand personality used to draft the post
    pub personality: Option<String>,
    /// Video duration in seconds
    pub duration: Option<u32>,
}

impl SocialPost {
    /// Create a new draft post for the given platform
    pub fn new(platform: SocialPlatform) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            platform,
            content: String::new(),
            caption: String::new(),
            hashtags: Vec::new(),
            scheduled_date: None,
            media_url: None,
            media_type: None,
            template: None,
            status: PostStatus::Draft,
            created_at: now,
            updated_at: now,
            personality: None,
            duration: None,
        }
    }

    /// Update the caption
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
        self.touch();
    }

    /// Update the body content
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.touch();
    }

    /// Set all hashtags (replacing existing)
    pub fn set_hashtags(&mut self, hashtags: Vec<String>) {
        self.hashtags = hashtags;
        self.touch();
    }

    /// Schedule the post. Moves a draft to the scheduled state.
    pub fn schedule(&mut self, date: DateTime<Utc>) {
        self.scheduled_date = Some(date);
        if self.status == PostStatus::Draft {
            self.status = PostStatus::Scheduled;
        }
        self.touch();
    }
}

impl Entity for SocialPost {
    const STORE: &'static str = "social";
    const COLLECTION: &'static str = "social_posts";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self) {
        self.updated_at = self.updated_at.max(Utc::now());
    }
}

/// Partial update for a social post.
#[derive(Debug, Clone, Default)]
pub struct SocialPostPatch {
    pub platform: Option<SocialPlatform>,
    pub content: Option<String>,
    pub caption: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
    pub media_url: Option<Option<String>>,
    pub media_type: Option<Option<MediaType>>,
    pub template: Option<Option<String>>,
    pub status: Option<PostStatus>,
    pub personality: Option<Option<String>>,
    pub duration: Option<Option<u32>>,
}

impl SocialPostPatch {
    /// Shallow-merge this patch into the post
    pub fn apply(self, post: &mut SocialPost) {
        if let Some(platform) = self.platform {
            post.platform = platform;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(caption) = self.caption {
            post.caption = caption;
        }
        if let Some(hashtags) = self.hashtags {
            post.hashtags = hashtags;
        }
        if let Some(scheduled_date) = self.scheduled_date {
            post.scheduled_date = scheduled_date;
        }
        if let Some(media_url) = self.media_url {
            post.media_url = media_url;
        }
        if let Some(media_type) = self.media_type {
            post.media_type = media_type;
        }
        if let Some(template) = self.template {
            post.template = template;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if let Some(personality) = self.personality {
            post.personality = personality;
        }
        if let Some(duration) = self.duration {
            post.duration = duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_post() {
        let post = SocialPost::new(SocialPlatform::Instagram);
        assert_eq!(post.platform, SocialPlatform::Instagram);
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.scheduled_date.is_none());
        assert!(post.hashtags.is_empty());
    }

    #[test]
    fn test_schedule_moves_draft_to_scheduled() {
        let mut post = SocialPost::new(SocialPlatform::Twitter);
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        post.schedule(date);
        assert_eq!(post.status, PostStatus::Scheduled);
        assert_eq!(post.scheduled_date, Some(date));
    }

    #[test]
    fn test_schedule_keeps_published_status() {
        let mut post = SocialPost::new(SocialPlatform::Twitter);
        post.status = PostStatus::Published;
        post.schedule(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap());
        assert_eq!(post.status, PostStatus::Published);
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!(
            "LinkedIn".parse::<SocialPlatform>().unwrap(),
            SocialPlatform::Linkedin
        );
        assert!("myspace".parse::<SocialPlatform>().is_err());
    }

    #[test]
    fn test_patch_merges_only_given_fields() {
        let mut post = SocialPost::new(SocialPlatform::Facebook);
        post.set_caption("Launch day");
        post.set_hashtags(vec!["launch".to_string()]);

        let patch = SocialPostPatch {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        patch.apply(&mut post);

        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.caption, "Launch day");
        assert_eq!(post.hashtags, vec!["launch"]);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut post = SocialPost::new(SocialPlatform::Tiktok);
        post.media_type = Some(MediaType::Video);
        post.duration = Some(30);
        let json = serde_json::to_string(&post).unwrap();
        let deserialized: SocialPost = serde_json::from_str(&json).unwrap();
        assert_eq!(post, deserialized);
    }
}
