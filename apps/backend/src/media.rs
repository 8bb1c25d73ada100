//! Filesystem store for post images.
//!
//! Clients send images as base64 payloads inside the create-post body; the
//! store decodes them, writes them under its root directory, and hands back
//! the public path recorded on the post row. Serving the files themselves
//! is a deployment concern (reverse proxy or static file server).

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;

pub const DEFAULT_MEDIA_ROOT: &str = "uploads/images";
pub const PUBLIC_BASE: &str = "/uploads/images";

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode a base64 image payload and persist it under the store root.
    /// Returns the public path to record on the post row.
    pub async fn save_image(&self, payload: &str) -> Result<String, AppError> {
        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|_| AppError::bad_request("INVALID_IMAGE", "Image is not valid base64"))?;

        let filename = format!("{}.jpg", Uuid::new_v4());
        let filepath = self.root.join(&filename);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::internal(format!("failed to create media dir: {e}")))?;
        tokio::fs::write(&filepath, &bytes)
            .await
            .map_err(|e| AppError::internal(format!("failed to write image: {e}")))?;

        debug!(bytes = bytes.len(), file = %filename, "stored image");
        Ok(format!("{PUBLIC_BASE}/{filename}"))
    }
}

impl Default for MediaStore {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_image_writes_file_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        // "hello" in base64
        let path = store.save_image("aGVsbG8=").await.unwrap();
        assert!(path.starts_with("/uploads/images/"));
        assert!(path.ends_with(".jpg"));

        let filename = path.rsplit('/').next().unwrap();
        let on_disk = std::fs::read(dir.path().join(filename)).unwrap();
        assert_eq!(on_disk, b"hello");
    }

    #[tokio::test]
    async fn save_image_rejects_invalid_base64() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let err = store.save_image("not//valid!!base64???").await.unwrap_err();
        match err {
            AppError::BadRequest { code, .. } => assert_eq!(code, "INVALID_IMAGE"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn two_saves_get_distinct_filenames() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let a = store.save_image("aGVsbG8=").await.unwrap();
        let b = store.save_image("aGVsbG8=").await.unwrap();
        assert_ne!(a, b);
    }
}
