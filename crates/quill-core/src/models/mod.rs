//! Data models for Quill
//!
//! Defines the content entities: blog posts, ebooks with chapters, and
//! social posts. Entities share a common lifecycle: a UUID assigned once at
//! creation, UTC timestamps, and mutation through the stores only.

mod blog;
mod ebook;
mod social;

pub use blog::{BlogPost, BlogPostPatch};
pub use ebook::{
    Chapter, ChapterPatch, Ebook, EbookFormat, EbookPatch, EbookStatus, ParseEbookStatusError,
    ParseFormatError,
};
pub use social::{
    MediaType, ParsePlatformError, ParseStatusError, PostStatus, SocialPlatform, SocialPost,
    SocialPostPatch,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// A persisted content entity.
///
/// The store name keys the durable mirror on disk (one JSON file per store);
/// the collection name keys the remote document backend.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Durable store name, e.g. `"blog"`.
    const STORE: &'static str;
    /// Remote collection name, e.g. `"blog_posts"`.
    const COLLECTION: &'static str;

    /// Stable identifier, assigned once at creation.
    fn id(&self) -> Uuid;

    /// Refresh `updated_at`.
    ///
    /// Never moves the timestamp backwards, so the mutation history stays
    /// monotonic even if the wall clock steps.
    fn touch(&mut self);
}
