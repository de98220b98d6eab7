//! Remote mirror
//!
//! Best-effort mirroring of store mutations to a remote document backend.
//!
//! ## Contract
//!
//! In local mode the backend is never invoked and the durable store files
//! are the only persistence. In remote mode, each store create/update is
//! paired with an upsert and each delete with a delete, AFTER the local
//! mutation. A remote failure is reported but the local mutation is not
//! rolled back: local availability wins over remote consistency.
//!
//! The locally-generated entity id is the remote document key, so there is
//! no id-reconciliation step and no orphaned-document state.

mod adapter;
mod error;
mod http;

pub use adapter::{RemoteBackend, SyncAdapter};
pub use error::SyncError;
pub use http::HttpBackend;
