//! Sync adapter
//!
//! Gates every remote call on the operating mode. All mirroring goes
//! through `SyncAdapter`; callers never talk to a backend directly.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::SyncError;
use super::http::HttpBackend;
use crate::config::Config;
use crate::models::Entity;

/// A remote document backend.
///
/// Documents live in per-type collections and are keyed by the entity's
/// locally-generated id.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Create or replace a document
    async fn upsert(&self, collection: &str, id: Uuid, document: Value) -> Result<(), SyncError>;

    /// Delete a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), SyncError>;
}

/// Best-effort mirror of store mutations to a remote backend.
///
/// In local mode the backend is never invoked: every mirror call returns
/// `Ok` immediately.
pub struct SyncAdapter {
    backend: Option<Box<dyn RemoteBackend>>,
    local_mode: bool,
}

impl SyncAdapter {
    /// Create an adapter in local mode: no backend, no remote calls, ever
    pub fn local() -> Self {
        Self {
            backend: None,
            local_mode: true,
        }
    }

    /// Create an adapter backed by the given remote
    pub fn new(backend: Box<dyn RemoteBackend>) -> Self {
        Self {
            backend: Some(backend),
            local_mode: false,
        }
    }

    /// Build the adapter the configuration asks for: local mode, or an
    /// HTTP backend against the configured sync URL
    pub fn from_config(config: &Config) -> Result<Self, SyncError> {
        if config.local_mode() {
            return Ok(Self::local());
        }
        // local_mode() is false only when sync_url is set
        let url = config.sync_url.clone().unwrap_or_default();
        let backend = HttpBackend::new(url, config.sync_api_key.clone())?;
        Ok(Self::new(Box::new(backend)))
    }

    /// Switch modes at runtime.
    ///
    /// Entering local mode stops all remote calls without discarding the
    /// backend, so a session can fall back to local-only when the remote
    /// becomes unreachable.
    pub fn set_local_mode(&mut self, local: bool) {
        self.local_mode = local;
    }

    /// Whether this adapter currently makes remote calls
    pub fn is_local(&self) -> bool {
        self.local_mode || self.backend.is_none()
    }

    /// Mirror a create or update.
    ///
    /// The caller has already committed the local mutation; a remote
    /// failure is logged and returned but must not be treated as a reason
    /// to roll back.
    pub async fn mirror_upsert<T: Entity>(&self, entity: &T) -> Result<(), SyncError> {
        if self.local_mode {
            return Ok(());
        }
        let Some(backend) = &self.backend else {
            return Ok(());
        };

        let document = serde_json::to_value(entity)?;
        match backend.upsert(T::COLLECTION, entity.id(), document).await {
            Ok(()) => {
                debug!(collection = T::COLLECTION, id = %entity.id(), "mirrored upsert");
                Ok(())
            }
            Err(e) => {
                warn!(collection = T::COLLECTION, id = %entity.id(), error = %e,
                      "remote mirror failed; local state retained");
                Err(e)
            }
        }
    }

    /// Mirror a delete
    pub async fn mirror_delete<T: Entity>(&self, id: Uuid) -> Result<(), SyncError> {
        if self.local_mode {
            return Ok(());
        }
        let Some(backend) = &self.backend else {
            return Ok(());
        };

        match backend.delete(T::COLLECTION, id).await {
            Ok(()) => {
                debug!(collection = T::COLLECTION, %id, "mirrored delete");
                Ok(())
            }
            Err(e) => {
                warn!(collection = T::COLLECTION, %id, error = %e,
                      "remote mirror failed; local state retained");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlogPost;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Test double that counts invocations
    struct CountingBackend {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl RemoteBackend for CountingBackend {
        async fn upsert(
            &self,
            _collection: &str,
            _id: Uuid,
            _document: Value,
        ) -> Result<(), SyncError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SyncError::Remote { status: 500 });
            }
            Ok(())
        }

        async fn delete(&self, _collection: &str, _id: Uuid) -> Result<(), SyncError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SyncError::Remote { status: 500 });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_local_mode_never_invokes_backend() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut adapter = SyncAdapter::new(Box::new(CountingBackend {
            calls: calls.clone(),
            fail: false,
        }));
        adapter.set_local_mode(true);
        assert!(adapter.is_local());

        let post = BlogPost::new("Post");
        adapter.mirror_upsert(&post).await.unwrap();
        adapter.mirror_delete::<BlogPost>(post.id).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remote_mode_invokes_backend() {
        let calls = Arc::new(AtomicUsize::new(0));
        let adapter = SyncAdapter::new(Box::new(CountingBackend {
            calls: calls.clone(),
            fail: false,
        }));
        assert!(!adapter.is_local());

        let post = BlogPost::new("Post");
        adapter.mirror_upsert(&post).await.unwrap();
        adapter.mirror_delete::<BlogPost>(post.id).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_backend_failure_is_returned() {
        let calls = Arc::new(AtomicUsize::new(0));
        let adapter = SyncAdapter::new(Box::new(CountingBackend {
            calls: calls.clone(),
            fail: true,
        }));

        let post = BlogPost::new("Post");
        let result = adapter.mirror_upsert(&post).await;
        assert!(matches!(result, Err(SyncError::Remote { status: 500 })));
    }

    #[tokio::test]
    async fn test_adapter_without_backend_is_a_no_op() {
        let adapter = SyncAdapter::local();
        assert!(adapter.is_local());

        let post = BlogPost::new("Post");
        adapter.mirror_upsert(&post).await.unwrap();
        adapter.mirror_delete::<BlogPost>(post.id).await.unwrap();
    }

    #[test]
    fn test_from_config_respects_local_mode() {
        let config = Config::default();
        let adapter = SyncAdapter::from_config(&config).unwrap();
        assert!(adapter.is_local());

        let config = Config {
            sync_enabled: true,
            sync_url: Some("https://sync.example.com".to_string()),
            ..Default::default()
        };
        let adapter = SyncAdapter::from_config(&config).unwrap();
        assert!(!adapter.is_local());
    }
}
