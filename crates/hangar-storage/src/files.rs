//! File service over the object store
//!
//! Maps the logical file kinds (mission plans, imagery, VM key files) onto
//! buckets, enforces the per-kind upload rules, and owns the path
//! convention `{client_id}/{timestamp_millis}_{filename}`. The timestamp
//! prefix keeps re-uploads of the same filename from colliding; listings
//! strip it again for display.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use hangar_common::{FILE_KIND_IMAGE, FILE_KIND_MISSION, FILE_KIND_PEM, HangarError};

use crate::store::ObjectStore;

/// Default signed-URL lifetime
const DEFAULT_URL_TTL_SECS: u64 = 3600;
/// Signed URLs are capped at seven days, the S3 presigning maximum
const MAX_URL_TTL_SECS: u64 = 7 * 24 * 3600;

const MAX_MISSION_SIZE: usize = 20 * 1024 * 1024;
const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;
const MAX_PEM_SIZE: usize = 16 * 1024;

/// Logical file kind, selecting the bucket and the upload rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Mission,
    Image,
    Pem,
}

impl FileKind {
    pub fn parse(value: &str) -> Result<Self, HangarError> {
        match value {
            FILE_KIND_MISSION => Ok(FileKind::Mission),
            FILE_KIND_IMAGE => Ok(FileKind::Image),
            FILE_KIND_PEM => Ok(FileKind::Pem),
            other => Err(HangarError::Validation(format!(
                "unknown file kind '{}'",
                other
            ))),
        }
    }

    pub fn bucket(self) -> &'static str {
        match self {
            FileKind::Mission => "missions",
            FileKind::Image => "images",
            FileKind::Pem => "pems",
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Mission => &["json", "plan", "waypoints"],
            FileKind::Image => &["png", "jpg", "jpeg", "gif", "webp"],
            FileKind::Pem => &["pem"],
        }
    }

    fn max_size(self) -> usize {
        match self {
            FileKind::Mission => MAX_MISSION_SIZE,
            FileKind::Image => MAX_IMAGE_SIZE,
            FileKind::Pem => MAX_PEM_SIZE,
        }
    }
}

/// One uploaded file as the console presents it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Display name with the timestamp prefix stripped
    pub name: String,
    /// Full object path within the kind's bucket
    pub path: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// Upload a file for a client.
///
/// Validates the filename against the kind's extension allow-list and the
/// payload against its size cap, then writes to the timestamped per-client
/// path.
pub async fn upload(
    store: &dyn ObjectStore,
    client_id: &str,
    kind: FileKind,
    filename: &str,
    bytes: Bytes,
) -> anyhow::Result<StoredFile> {
    let name = sanitize_filename(filename);
    check_extension(kind, &name)?;

    if bytes.is_empty() {
        return Err(HangarError::Validation("file is empty".to_string()).into());
    }
    if bytes.len() > kind.max_size() {
        return Err(HangarError::Validation(format!(
            "file exceeds the {} byte limit for {} uploads",
            kind.max_size(),
            kind.bucket()
        ))
        .into());
    }

    let created_at = Utc::now();
    let path = format!("{}/{}_{}", client_id, created_at.timestamp_millis(), name);
    let size = bytes.len() as u64;

    store.ensure_bucket(kind.bucket()).await?;
    store
        .put(kind.bucket(), &path, bytes, content_type_for(&name))
        .await?;

    info!(client_id, bucket = kind.bucket(), path, size, "file uploaded");

    Ok(StoredFile {
        name,
        path,
        size,
        created_at,
    })
}

/// List a client's files of one kind, newest first.
pub async fn list(
    store: &dyn ObjectStore,
    client_id: &str,
    kind: FileKind,
) -> anyhow::Result<Vec<StoredFile>> {
    let prefix = format!("{}/", client_id);
    let mut files: Vec<StoredFile> = store
        .list(kind.bucket(), &prefix)
        .await?
        .into_iter()
        .map(|object| StoredFile {
            name: display_name(&object.path),
            size: object.size,
            created_at: object.created_at,
            path: object.path,
        })
        .collect();

    // Paths carry the upload timestamp, which breaks ties when the store
    // only reports second-granular times
    files.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.path.cmp(&a.path)));
    Ok(files)
}

/// Produce a time-limited download URL for one of the client's files.
pub async fn signed_url(
    store: &dyn ObjectStore,
    client_id: &str,
    kind: FileKind,
    path: &str,
    ttl_secs: Option<u64>,
) -> anyhow::Result<String> {
    check_scope(client_id, path)?;
    let ttl = ttl_secs
        .unwrap_or(DEFAULT_URL_TTL_SECS)
        .clamp(1, MAX_URL_TTL_SECS);
    store
        .presign_get(kind.bucket(), path, Duration::from_secs(ttl))
        .await
}

/// Delete one of the client's files.
pub async fn delete(
    store: &dyn ObjectStore,
    client_id: &str,
    kind: FileKind,
    path: &str,
) -> anyhow::Result<()> {
    check_scope(client_id, path)?;
    store.remove(kind.bucket(), &[path.to_string()]).await?;
    info!(client_id, bucket = kind.bucket(), path, "file deleted");
    Ok(())
}

/// Strip the `{timestamp}_` prefix from an object path's basename.
pub fn display_name(path: &str) -> String {
    let basename = path.rsplit('/').next().unwrap_or(path);
    match basename.split_once('_') {
        Some((timestamp, rest)) if timestamp.chars().all(|c| c.is_ascii_digit()) => {
            rest.to_string()
        }
        _ => basename.to_string(),
    }
}

/// Reduce a user-supplied filename to a safe basename.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn check_extension(kind: FileKind, name: &str) -> Result<(), HangarError> {
    let extension = name
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.to_ascii_lowercase()));
    match extension {
        Some((stem, ext)) if !stem.is_empty() && kind.allowed_extensions().contains(&ext.as_str()) => {
            Ok(())
        }
        _ => Err(HangarError::Validation(format!(
            "filename '{}' is not allowed for {} uploads (expected one of: {})",
            name,
            kind.bucket(),
            kind.allowed_extensions().join(", ")
        ))),
    }
}

fn check_scope(client_id: &str, path: &str) -> Result<(), HangarError> {
    if client_id.is_empty() || !path.starts_with(&format!("{}/", client_id)) {
        return Err(HangarError::Validation(format!(
            "path '{}' does not belong to client '{}'",
            path, client_id
        )));
    }
    Ok(())
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pem") => "application/x-pem-file",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::FsObjectStore;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FsObjectStore) {
        let dir = TempDir::new().unwrap();
        let store = FsObjectStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_upload_then_list_resolves_display_name() {
        let (_dir, store) = temp_store();
        upload(
            &store,
            "c1",
            FileKind::Mission,
            "mission.json",
            Bytes::from_static(b"{\"waypoints\":[]}"),
        )
        .await
        .unwrap();

        let files = list(&store, "c1", FileKind::Mission).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "mission.json");
        assert!(files[0].path.starts_with("c1/"));
        assert!(files[0].path.ends_with("_mission.json"));
    }

    #[tokio::test]
    async fn test_upload_rejects_wrong_extension() {
        let (_dir, store) = temp_store();
        let err = upload(
            &store,
            "c1",
            FileKind::Image,
            "mission.json",
            Bytes::from_static(b"x"),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HangarError>(),
            Some(HangarError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_rejects_oversize_pem() {
        let (_dir, store) = temp_store();
        let oversize = Bytes::from(vec![0u8; MAX_PEM_SIZE + 1]);
        assert!(
            upload(&store, "c1", FileKind::Pem, "key.pem", oversize)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_file() {
        let (_dir, store) = temp_store();
        assert!(
            upload(&store, "c1", FileKind::Mission, "mission.json", Bytes::new())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_signed_url_scope_checked() {
        let (_dir, store) = temp_store();
        let file = upload(
            &store,
            "c1",
            FileKind::Mission,
            "mission.json",
            Bytes::from_static(b"{}"),
        )
        .await
        .unwrap();

        assert!(
            signed_url(&store, "c1", FileKind::Mission, &file.path, None)
                .await
                .is_ok()
        );
        assert!(
            signed_url(&store, "c2", FileKind::Mission, &file.path, None)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_delete_scope_checked() {
        let (_dir, store) = temp_store();
        let file = upload(
            &store,
            "c1",
            FileKind::Mission,
            "mission.json",
            Bytes::from_static(b"{}"),
        )
        .await
        .unwrap();

        assert!(
            delete(&store, "c2", FileKind::Mission, &file.path)
                .await
                .is_err()
        );
        delete(&store, "c1", FileKind::Mission, &file.path)
            .await
            .unwrap();
        assert!(
            list(&store, "c1", FileKind::Mission)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("mission.json"), "mission.json");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("my mission v2.json"), "my_mission_v2.json");
        assert_eq!(sanitize_filename("C:\\keys\\vm.pem"), "vm.pem");
    }

    #[test]
    fn test_display_name_strips_timestamp() {
        assert_eq!(display_name("c1/1700000000000_mission.json"), "mission.json");
        assert_eq!(display_name("c1/1700000000000_my_mission.json"), "my_mission.json");
        // No digit prefix means nothing to strip
        assert_eq!(display_name("c1/mission.json"), "mission.json");
    }

    #[test]
    fn test_file_kind_parse() {
        assert_eq!(FileKind::parse("mission").unwrap(), FileKind::Mission);
        assert_eq!(FileKind::parse("image").unwrap(), FileKind::Image);
        assert_eq!(FileKind::parse("pem").unwrap(), FileKind::Pem);
        assert!(FileKind::parse("video").is_err());
    }
}
