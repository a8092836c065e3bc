//! Object store trait
//!
//! The collaborator boundary towards bucket-oriented object storage. The
//! production backend talks to an S3-compatible service; standalone mode and
//! the test suites use the filesystem backend. All validation of file kinds
//! and sizes happens in the calling services, never here.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Metadata for one stored object, as reported by `ObjectStore::list`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    /// Object path relative to its bucket
    pub path: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// Interface to a bucket-oriented object storage backend.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create the bucket if it does not exist yet.
    async fn ensure_bucket(&self, bucket: &str) -> anyhow::Result<()>;

    /// Store an object, overwriting any previous object at the same path.
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> anyhow::Result<()>;

    /// List objects whose path starts with `prefix`.
    async fn list(&self, bucket: &str, prefix: &str) -> anyhow::Result<Vec<ObjectInfo>>;

    /// Produce a time-limited read URL for one object.
    async fn presign_get(
        &self,
        bucket: &str,
        path: &str,
        ttl: Duration,
    ) -> anyhow::Result<String>;

    /// Remove the given objects. Paths that no longer exist are not an error.
    async fn remove(&self, bucket: &str, paths: &[String]) -> anyhow::Result<()>;
}
