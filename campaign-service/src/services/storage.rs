//! Transient store for generated images.
//!
//! Each image lives under a fresh random name in a scratch directory only
//! long enough to be read back and transmitted. Handles are request-scoped;
//! no cross-request sharing.

use service_core::error::AppError;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

/// Opaque reference to one file in the scratch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn file_name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    scratch_dir: PathBuf,
}

impl ImageStore {
    pub async fn new(scratch_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let scratch_dir = scratch_dir.into();
        if !scratch_dir.exists() {
            fs::create_dir_all(&scratch_dir).await?;
        }
        Ok(Self { scratch_dir })
    }

    /// Write bytes under a fresh `{uuid}.png` name and return its handle.
    pub async fn save(&self, bytes: &[u8]) -> Result<ImageHandle, AppError> {
        let name = format!("{}.png", Uuid::new_v4());
        fs::write(self.scratch_dir.join(&name), bytes).await?;
        Ok(ImageHandle(name))
    }

    pub async fn read(&self, handle: &ImageHandle) -> Result<Vec<u8>, AppError> {
        let data = fs::read(self.scratch_dir.join(&handle.0)).await?;
        Ok(data)
    }

    /// Remove the file; a no-op when it is already gone.
    pub async fn delete(&self, handle: &ImageHandle) -> Result<(), AppError> {
        let path = self.scratch_dir.join(&handle.0);
        if path.exists() {
            fs::remove_file(path).await?;
        }
        Ok(())
    }
}
