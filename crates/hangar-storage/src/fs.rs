//! Filesystem object store backend
//!
//! Buckets are directories under a data root; object paths map to files
//! below them. Backs standalone mode and the test suites. "Signed" URLs are
//! `file://` URLs carrying the expiry as a query parameter, which is enough
//! for a single-machine deployment.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::store::{ObjectInfo, ObjectStore};

pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, bucket: &str, path: &str) -> anyhow::Result<PathBuf> {
        if bucket.is_empty() || bucket.contains(['/', '\\']) {
            anyhow::bail!("invalid bucket name '{}'", bucket);
        }
        if path.is_empty() || path.split('/').any(|part| part.is_empty() || part == "..") {
            anyhow::bail!("invalid object path '{}'", path);
        }
        Ok(self.root.join(bucket).join(path))
    }

    fn collect(
        &self,
        dir: &Path,
        bucket_root: &Path,
        prefix: &str,
        out: &mut Vec<ObjectInfo>,
    ) -> anyhow::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.collect(&entry.path(), bucket_root, prefix, out)?;
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(bucket_root)
                .map_err(|e| anyhow::anyhow!("path outside bucket root: {}", e))?
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");

            if !relative.starts_with(prefix) {
                continue;
            }

            let metadata = entry.metadata()?;
            let created_at = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            out.push(ObjectInfo {
                path: relative,
                size: metadata.len(),
                created_at,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn ensure_bucket(&self, bucket: &str) -> anyhow::Result<()> {
        fs::create_dir_all(self.root.join(bucket))
            .map_err(|e| anyhow::anyhow!("failed to create bucket '{}': {}", bucket, e))
    }

    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        _content_type: &str,
    ) -> anyhow::Result<()> {
        let target = self.resolve(bucket, path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(bucket, path, size = bytes.len(), "writing object");
        fs::write(&target, &bytes)
            .map_err(|e| anyhow::anyhow!("failed to write '{}/{}': {}", bucket, path, e))
    }

    async fn list(&self, bucket: &str, prefix: &str) -> anyhow::Result<Vec<ObjectInfo>> {
        let bucket_root = self.root.join(bucket);
        if !bucket_root.is_dir() {
            return Ok(Vec::new());
        }
        let mut objects = Vec::new();
        self.collect(&bucket_root, &bucket_root, prefix, &mut objects)?;
        Ok(objects)
    }

    async fn presign_get(
        &self,
        bucket: &str,
        path: &str,
        ttl: Duration,
    ) -> anyhow::Result<String> {
        let target = self.resolve(bucket, path)?;
        let expires = Utc::now() + chrono::Duration::from_std(ttl)?;
        Ok(format!(
            "file://{}?expires={}",
            target.display(),
            expires.timestamp()
        ))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> anyhow::Result<()> {
        for path in paths {
            let target = self.resolve(bucket, path)?;
            match fs::remove_file(&target) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(anyhow::anyhow!(
                        "failed to delete '{}/{}': {}",
                        bucket,
                        path,
                        e
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FsObjectStore) {
        let dir = TempDir::new().unwrap();
        let store = FsObjectStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_put_list_roundtrip() {
        let (_dir, store) = temp_store();
        store.ensure_bucket("missions").await.unwrap();
        store
            .put(
                "missions",
                "c1/100_mission.json",
                Bytes::from_static(b"{}"),
                "application/json",
            )
            .await
            .unwrap();

        let objects = store.list("missions", "c1/").await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].path, "c1/100_mission.json");
        assert_eq!(objects[0].size, 2);
    }

    #[tokio::test]
    async fn test_list_scopes_by_prefix() {
        let (_dir, store) = temp_store();
        store.ensure_bucket("missions").await.unwrap();
        for path in ["c1/1_a.json", "c1/2_b.json", "c2/3_c.json"] {
            store
                .put("missions", path, Bytes::from_static(b"x"), "application/json")
                .await
                .unwrap();
        }

        let c1 = store.list("missions", "c1/").await.unwrap();
        assert_eq!(c1.len(), 2);
        assert!(c1.iter().all(|o| o.path.starts_with("c1/")));
    }

    #[tokio::test]
    async fn test_list_missing_bucket_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list("missions", "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_tolerates_missing() {
        let (_dir, store) = temp_store();
        store.ensure_bucket("missions").await.unwrap();
        store
            .put("missions", "c1/1_a.json", Bytes::from_static(b"x"), "application/json")
            .await
            .unwrap();

        store
            .remove(
                "missions",
                &["c1/1_a.json".to_string(), "c1/ghost.json".to_string()],
            )
            .await
            .unwrap();
        assert!(store.list("missions", "c1/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_presign_embeds_expiry() {
        let (_dir, store) = temp_store();
        store.ensure_bucket("missions").await.unwrap();
        let url = store
            .presign_get("missions", "c1/1_a.json", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.contains("expires="));
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let (_dir, store) = temp_store();
        assert!(
            store
                .put("missions", "../escape", Bytes::from_static(b"x"), "text/plain")
                .await
                .is_err()
        );
        assert!(
            store
                .put("missions", "c1/../../escape", Bytes::from_static(b"x"), "text/plain")
                .await
                .is_err()
        );
    }
}
