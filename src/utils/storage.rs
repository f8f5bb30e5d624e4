//! Local-disk storage for farmer profile images.
//!
//! Files are written under the configured upload directory keyed by a
//! generated UUID filename and exposed to clients under [`PUBLIC_PREFIX`].

use std::path::PathBuf;

use tokio::fs;
use uuid::Uuid;

use crate::config::upload::UploadConfig;
use crate::utils::errors::AppError;

/// Public URL prefix the router serves the upload directory under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// 5 MB cap, matching what a phone-camera profile shot reasonably needs.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/webp", "webp"),
];

#[derive(Clone, Debug)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
        }
    }

    /// Save an uploaded image and return its public path
    /// (e.g. `/uploads/2f9c...-d4.png`).
    pub async fn save(&self, content_type: &str, bytes: &[u8]) -> Result<String, AppError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Image exceeds maximum size of {} bytes",
                MAX_IMAGE_BYTES
            )));
        }

        let ext = ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(mime, _)| *mime == content_type)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!(
                    "Unsupported image type '{}'",
                    content_type
                ))
            })?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create upload dir: {}", e)))?;

        let filename = format!("{}.{}", Uuid::new_v4(), ext);
        let path = self.dir.join(&filename);
        fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to store image: {}", e)))?;

        Ok(format!("{}/{}", PUBLIC_PREFIX, filename))
    }

    /// Best-effort removal of a previously stored image. Missing files and
    /// I/O failures are ignored; deletion happens after the owning row is
    /// already gone.
    pub async fn remove(&self, public_path: &str) {
        let Some(filename) = public_path.strip_prefix(&format!("{}/", PUBLIC_PREFIX)) else {
            return;
        };
        // Reject anything that could escape the upload directory.
        if filename.contains('/') || filename.contains("..") {
            return;
        }
        let _ = fs::remove_file(self.dir.join(filename)).await;
    }
}
