//! S3-compatible object store backend
//!
//! Wraps the AWS SDK against any S3-compatible endpoint. Credentials and
//! endpoint come from configuration; when no static keys are configured the
//! SDK falls back to its default provider chain.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::store::{ObjectInfo, ObjectStore};

/// Connection settings for the S3 backend.
#[derive(Clone, Debug, Default)]
pub struct S3Settings {
    /// Custom endpoint for S3-compatible services; `None` means AWS proper
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Path-style addressing, required by most self-hosted S3 services
    pub force_path_style: bool,
}

pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Build a client from the given settings.
    pub async fn connect(settings: &S3Settings) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(settings.force_path_style);

        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        if let (Some(access_key), Some(secret_key)) =
            (&settings.access_key, &settings.secret_key)
        {
            builder = builder.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "hangar-config",
            ));
        }

        info!(
            endpoint = settings.endpoint.as_deref().unwrap_or("aws"),
            region = %settings.region,
            "S3 object store initialized"
        );

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn ensure_bucket(&self, bucket: &str) -> anyhow::Result<()> {
        if self.client.head_bucket().bucket(bucket).send().await.is_ok() {
            return Ok(());
        }

        match self.client.create_bucket().bucket(bucket).send().await {
            Ok(_) => {
                info!(bucket, "created bucket");
                Ok(())
            }
            Err(err) => {
                let service_err = err.into_service_error();
                // A concurrent creator is fine; the bucket exists either way
                if service_err.is_bucket_already_owned_by_you()
                    || service_err.is_bucket_already_exists()
                {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!(
                        "failed to create bucket '{}': {}",
                        bucket,
                        service_err
                    ))
                }
            }
        }
    }

    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> anyhow::Result<()> {
        debug!(bucket, path, size = bytes.len(), "uploading object");

        self.client
            .put_object()
            .bucket(bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("failed to upload '{}/{}': {}", bucket, path, e))?;

        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> anyhow::Result<Vec<ObjectInfo>> {
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(prefix);
            if let Some(token) = &continuation {
                request = request.continuation_token(token.clone());
            }

            let response = request
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("failed to list '{}/{}': {}", bucket, prefix, e))?;

            for object in response.contents() {
                let Some(path) = object.key() else { continue };
                let created_at = object
                    .last_modified()
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts.secs(), ts.subsec_nanos()))
                    .unwrap_or_else(Utc::now);
                objects.push(ObjectInfo {
                    path: path.to_string(),
                    size: object.size().unwrap_or(0).max(0) as u64,
                    created_at,
                });
            }

            match response.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(objects)
    }

    async fn presign_get(
        &self,
        bucket: &str,
        path: &str,
        ttl: Duration,
    ) -> anyhow::Result<String> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| anyhow::anyhow!("invalid presign TTL: {}", e))?;

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(path)
            .presigned(presigning)
            .await
            .map_err(|e| anyhow::anyhow!("failed to presign '{}/{}': {}", bucket, path, e))?;

        Ok(presigned.uri().to_string())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> anyhow::Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut delete = Delete::builder().quiet(true);
        for path in paths {
            delete = delete.objects(
                ObjectIdentifier::builder()
                    .key(path.clone())
                    .build()
                    .map_err(|e| anyhow::anyhow!("invalid object key '{}': {}", path, e))?,
            );
        }

        let response = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete.build().map_err(|e| anyhow::anyhow!("{}", e))?)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("failed to delete from '{}': {}", bucket, e))?;

        for error in response.errors() {
            warn!(
                bucket,
                key = error.key().unwrap_or(""),
                message = error.message().unwrap_or(""),
                "object delete reported an error"
            );
        }

        Ok(())
    }
}
