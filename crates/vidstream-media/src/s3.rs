//! S3-backed implementation of the MediaStorage port
//!
//! Streams a locally buffered upload file to the object store and returns
//! its public URL. The local temp file is removed in every outcome; a
//! failed upload is reported as `None`, never as an error, so callers
//! decide how a missing media object surfaces to the user.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client};
use tracing::{debug, warn};
use uuid::Uuid;

use vidstream_common::MediaStoreConfig;
use vidstream_core::traits::{MediaStorage, UploadedMedia};

/// Media storage backed by an S3-compatible object store.
#[derive(Clone)]
pub struct S3MediaStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3MediaStorage {
    /// Create a storage handle from an existing S3 client.
    pub fn new(client: Client, config: &MediaStoreConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a storage handle using the ambient AWS environment
    /// (credentials, region) for the client.
    pub async fn from_env(config: &MediaStoreConfig) -> Self {
        let aws_config =
            aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&aws_config), config)
    }

    /// Random object key preserving the original file extension.
    fn object_key(local_path: &Path) -> String {
        match local_path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_lowercase()),
            None => Uuid::new_v4().to_string(),
        }
    }

    /// Content type guessed from the file extension.
    fn content_type(local_path: &Path) -> String {
        mime_guess::from_path(local_path)
            .first_or_octet_stream()
            .to_string()
    }

    /// Remove the local temp file, tolerating a file that is already
    /// gone. The upload contract promises the temp file never leaks, so
    /// this must not fail the surrounding operation.
    async fn remove_local(local_path: &Path) {
        if let Err(e) = tokio::fs::remove_file(local_path).await {
            debug!(path = %local_path.display(), error = %e, "Temp file already removed");
        }
    }
}

#[async_trait]
impl MediaStorage for S3MediaStorage {
    async fn upload(&self, local_path: &Path) -> Option<UploadedMedia> {
        // No path means no temp file to clean either.
        if local_path.as_os_str().is_empty() {
            return None;
        }

        let bytes = match tokio::fs::read(local_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %local_path.display(), error = %e, "Upload skipped: cannot read local file");
                Self::remove_local(local_path).await;
                return None;
            }
        };

        let key = Self::object_key(local_path);
        let content_type = Self::content_type(local_path);

        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await;

        Self::remove_local(local_path).await;

        match result {
            Ok(_) => Some(UploadedMedia {
                url: format!("{}/{}", self.public_base_url, key),
            }),
            Err(e) => {
                warn!(
                    path = %local_path.display(),
                    bucket = %self.bucket,
                    error = %e,
                    "Media upload failed"
                );
                None
            }
        }
    }
}
