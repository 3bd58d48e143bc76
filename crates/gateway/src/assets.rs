//! Time-limited download URLs for uploaded design files.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;

use crate::error::GatewayError;

/// Default lifetime of a signed asset URL (seconds).
pub const DEFAULT_URL_TTL_SECS: u64 = 900;

/// Issues signed, expiring URLs for stored objects.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Return a URL granting read access to `key` for `ttl`.
    async fn signed_url(&self, key: &str, ttl: Duration) -> Result<String, GatewayError>;
}

/// S3-backed asset store using presigned `GetObject` requests.
pub struct S3AssetStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3AssetStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a store from the ambient AWS configuration (region, credentials)
    /// and the bucket named by `ASSET_BUCKET`.
    ///
    /// # Panics
    ///
    /// Panics if `ASSET_BUCKET` is not set.
    pub async fn from_env() -> Self {
        let bucket = std::env::var("ASSET_BUCKET").expect("ASSET_BUCKET must be set");
        let sdk_config = aws_config::load_from_env().await;
        Self::new(aws_sdk_s3::Client::new(&sdk_config), bucket)
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn signed_url(&self, key: &str, ttl: Duration) -> Result<String, GatewayError> {
        let presigning =
            PresigningConfig::expires_in(ttl).map_err(|e| GatewayError::Storage(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| GatewayError::Storage(e.to_string()))?;

        tracing::debug!(bucket = %self.bucket, key, ttl_secs = ttl.as_secs(), "Signed asset URL");
        Ok(request.uri().to_string())
    }
}
