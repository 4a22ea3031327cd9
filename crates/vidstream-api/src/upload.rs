//! Multipart upload intake
//!
//! Buffers an uploaded file under the configured upload directory before
//! the media hand-off. The media storage deletes the buffered file once
//! it has attempted the upload, so files written here do not accumulate.

use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use uuid::Uuid;

use vidstream_common::StorageConfig;

use crate::response::ApiError;

/// Persist a multipart file field to the upload directory and return the
/// buffered file's path.
pub async fn save_upload_field(
    field: Field<'_>,
    storage: &StorageConfig,
) -> Result<PathBuf, ApiError> {
    let file_name = buffered_file_name(field.file_name());

    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?;

    if data.len() > storage.max_file_size_bytes() {
        return Err(ApiError::invalid_multipart(format!(
            "File exceeds the maximum upload size of {} MB",
            storage.max_file_size_mb
        )));
    }

    let dir = Path::new(&storage.upload_dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(ApiError::internal)?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, &data)
        .await
        .map_err(ApiError::internal)?;

    Ok(path)
}

/// Random file name preserving the client's file extension, so content
/// type detection keeps working downstream.
fn buffered_file_name(original: Option<&str>) -> String {
    let extension = original
        .map(Path::new)
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str());

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_lowercase()),
        None => Uuid::new_v4().to_string(),
    }
}
