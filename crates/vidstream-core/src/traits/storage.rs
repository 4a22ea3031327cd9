//! Media storage port - hand-off of local temp files to the external store

use std::path::Path;

use async_trait::async_trait;

/// Result of a successful media upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Durable URL of the object in the external store.
    pub url: String,
}

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Upload a local temp file to the external store.
    ///
    /// Returns `None` when the path is empty, the file cannot be read, or
    /// the upload fails; the underlying error is swallowed and the caller
    /// translates `None` into a user-facing failure. The temp file is
    /// always removed by the time this returns, success or failure, and
    /// the removal itself tolerates an already-missing file.
    async fn upload(&self, local_path: &Path) -> Option<UploadedMedia>;
}
