//! Quill Core Library
//!
//! Core functionality for Quill, a local-first content studio for blog
//! posts, ebooks, and social media posts.
//!
//! # Architecture
//!
//! - **Stores**: one authoritative in-memory collection per content type
//! - **Storage**: each store mirrored to a JSON file, rewritten atomically
//!   on every mutation
//! - **Sync**: optional best-effort mirror to a remote document backend;
//!   never invoked in local mode
//!
//! All queries are served from memory; disk is read once when a store
//! opens.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = BlogStore::open(&config)?;
//!
//! // Add a post
//! let mut post = BlogPost::new("Hello, world");
//! post.set_content("First!");
//! store.add_post(post)?;
//!
//! // Query posts
//! let posts = store.posts();
//! ```
//!
//! # Modules
//!
//! - `store`: the entity stores (main entry point)
//! - `models`: content entities and their patches
//! - `storage`: durable JSON mirror
//! - `sync`: remote document-backend mirror
//! - `generate`: content generation client
//! - `config`: application configuration

pub mod config;
pub mod generate;
pub mod models;
pub mod storage;
pub mod store;
pub mod sync;

pub use config::Config;
pub use generate::{GenerateError, Generator};
pub use models::{
    BlogPost, BlogPostPatch, Chapter, ChapterPatch, Ebook, EbookFormat, EbookPatch, EbookStatus,
    Entity, MediaType, PostStatus, SocialPlatform, SocialPost, SocialPostPatch,
};
pub use storage::{StorageError, StorageStats};
pub use store::{BlogStore, EbookStore, SocialStore, StoreError, StoreResult};
pub use sync::{HttpBackend, RemoteBackend, SyncAdapter, SyncError};
