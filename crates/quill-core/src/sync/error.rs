//! Sync error handling

use thiserror::Error;

/// Errors from the remote mirror
#[derive(Error, Debug)]
pub enum SyncError {
    /// The backend rejected our credentials (401/403)
    #[error("remote backend rejected credentials; check sync_api_key")]
    Auth,

    /// The backend answered with an unexpected status
    #[error("remote backend returned status {status}")]
    Remote { status: u16 },

    /// The backend could not be reached (includes timeouts)
    #[error("failed to reach remote backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// The entity could not be serialized to a document
    #[error("failed to serialize entity: {0}")]
    Serialize(#[from] serde_json::Error),
}
