//! HTTP document backend
//!
//! Talks to a remote document store over HTTP: one collection per content
//! type, one document per entity, keyed by the entity id.
//!
//! - `PUT /{collection}/{id}` creates or replaces a document
//! - `DELETE /{collection}/{id}` removes one; 404 counts as success

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use super::adapter::RemoteBackend;
use super::error::SyncError;

/// Request timeout in seconds. Remote calls must stay bounded; a hung
/// backend surfaces as a transport error instead of a stuck session.
const REQUEST_TIMEOUT: u64 = 10;

/// HTTP implementation of the remote document backend
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpBackend {
    /// Create a backend for the given base URL
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT))
            .user_agent(concat!("quill/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn document_url(&self, collection: &str, id: Uuid) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl RemoteBackend for HttpBackend {
    async fn upsert(&self, collection: &str, id: Uuid, document: Value) -> Result<(), SyncError> {
        let request = self.client.put(self.document_url(collection, id)).json(&document);
        let response = self.authorize(request).send().await?;
        check_status(response.status())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<(), SyncError> {
        let request = self.client.delete(self.document_url(collection, id));
        let response = self.authorize(request).send().await?;

        // The document may never have been mirrored; that's fine
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check_status(response.status())
    }
}

fn check_status(status: StatusCode) -> Result<(), SyncError> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SyncError::Auth),
        _ => Err(SyncError::Remote {
            status: status.as_u16(),
        }),
    }
}
