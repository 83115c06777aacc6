//! Local filesystem store for attachment bytes.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use incidenthub_core::error::{AppError, ErrorKind};
use incidenthub_core::result::AppResult;

/// Stores attachment bytes on local disk under a configured root.
///
/// Files are addressed by an opaque UUID storage key; the original filename
/// lives only in the metadata row, so nothing client-controlled ever touches
/// the filesystem path.
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    /// Root directory for all stored files.
    root: PathBuf,
}

impl AttachmentStore {
    /// Create a new store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a storage key to its on-disk path.
    fn resolve(&self, key: Uuid) -> PathBuf {
        self.root.join(key.to_string())
    }

    /// Write attachment bytes under a fresh storage key.
    pub async fn save(&self, data: Bytes) -> AppResult<Uuid> {
        let key = Uuid::new_v4();
        let path = self.resolve(key);

        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write attachment {key}"),
                e,
            )
        })?;

        debug!(%key, bytes = data.len(), "Stored attachment");
        Ok(key)
    }

    /// Read attachment bytes by storage key.
    pub async fn read(&self, key: Uuid) -> AppResult<Bytes> {
        let path = self.resolve(key);
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Attachment {key} not found on disk"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read attachment {key}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    /// Remove attachment bytes by storage key.
    ///
    /// Missing files are ignored so a metadata delete stays idempotent.
    pub async fn remove(&self, key: Uuid) -> AppResult<()> {
        let path = self.resolve(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove attachment {key}"),
                e,
            )),
        }
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
