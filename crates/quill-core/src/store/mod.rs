//! Entity stores
//!
//! One store per content type, each an authoritative in-memory collection
//! mirrored to a durable JSON file. All mutation goes through the store
//! operations; the backing collections are never handed out mutably.
//!
//! ## Failure semantics
//!
//! Mutations apply to memory first and then rewrite the durable mirror. A
//! mirror write failure is returned to the caller (and logged) but the
//! in-memory mutation stands: in-memory state is the source of truth for
//! the session.

pub mod blog;
pub mod collection;
pub mod ebook;
pub mod social;

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

pub use blog::BlogStore;
pub use collection::Collection;
pub use ebook::EbookStore;
pub use social::SocialStore;

/// Errors from store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// `add` was called with an id already present in the collection
    #[error("an entity with id {id} already exists")]
    DuplicateId { id: Uuid },

    /// `update` (or a chapter operation) addressed a missing entity
    #[error("no entity found with id {id}")]
    NotFound { id: Uuid },

    /// A chapter operation addressed a missing chapter
    #[error("ebook {ebook_id} has no chapter {chapter_id}")]
    ChapterNotFound { ebook_id: Uuid, chapter_id: Uuid },

    /// A reorder request was not an exact permutation of the current
    /// chapter ids
    #[error("invalid chapter reorder: {reason}")]
    InvalidReorder { reason: String },

    /// The durable mirror could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
