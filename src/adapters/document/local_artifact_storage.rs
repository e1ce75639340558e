//! Local Filesystem Storage Adapter - Implementation of ArtifactStorage.
//!
//! Stores rendered reports as flat files under one base directory.
//! Uses atomic writes and SHA-256 checksums for data integrity.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::ports::{
    ArtifactStorage, ExportFormat, FilePath, RenderedArtifact, StorageError, StoredArtifact,
};

/// Default maximum artifact size (10 MB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for rendered reports.
///
/// # Directory Structure
///
/// ```text
/// {base_path}/
/// ├── proposal_PRJ-001_1710460800000.html
/// └── proposal_PRJ-002_1710547200000.json
/// ```
///
/// # Atomic Writes
///
/// 1. Write content to `{name}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{name}`
///
/// The temp file is removed if any step fails.
#[derive(Debug, Clone)]
pub struct LocalArtifactStorage {
    base_path: PathBuf,
    max_file_size_bytes: u64,
}

impl LocalArtifactStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }

    pub fn with_max_file_size(mut self, max_bytes: u64) -> Self {
        self.max_file_size_bytes = max_bytes;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Keeps `[A-Za-z0-9_-]`, replacing everything else with `_`.
    fn sanitize(project_id: &str) -> String {
        let cleaned: String = project_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if cleaned.is_empty() {
            "unnamed".to_string()
        } else {
            cleaned
        }
    }

    fn compute_checksum(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    async fn ensure_base_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }

    async fn write_temp(temp_path: &Path, content: &[u8]) -> Result<(), StorageError> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(content).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })
    }

    fn map_io(path: &Path, action: &str, e: std::io::Error) -> StorageError {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(path.display().to_string())
            }
            _ => StorageError::io(format!("Failed to {} {}: {}", action, path.display(), e)),
        }
    }
}

#[async_trait]
impl ArtifactStorage for LocalArtifactStorage {
    async fn write(
        &self,
        project_id: &str,
        rendered: &RenderedArtifact,
    ) -> Result<StoredArtifact, StorageError> {
        let size = rendered.content.len() as u64;
        if size > self.max_file_size_bytes {
            return Err(StorageError::file_too_large(size, self.max_file_size_bytes));
        }

        self.ensure_base_dir().await?;

        let stored_at = Utc::now();
        let final_path = self.path_for(project_id, rendered.format, stored_at);
        let mut temp_name = final_path.as_path().as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        if let Err(err) = Self::write_temp(&temp_path, &rendered.content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(err);
        }

        if let Err(e) = fs::rename(&temp_path, final_path.as_path()).await {
            warn!(path = %temp_path.display(), error = %e, "rename failed, removing temp file");
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path,
                e
            )));
        }

        let checksum = Self::compute_checksum(&rendered.content);
        info!(
            project_id = %project_id,
            path = %final_path,
            size_bytes = size,
            format = %rendered.format,
            "report artifact stored"
        );

        Ok(StoredArtifact {
            path: final_path,
            size_bytes: size,
            checksum,
            format: rendered.format,
            stored_at,
        })
    }

    async fn read(&self, path: &FilePath) -> Result<Vec<u8>, StorageError> {
        fs::read(path.as_path())
            .await
            .map_err(|e| Self::map_io(path.as_path(), "read", e))
    }

    async fn exists(&self, path: &FilePath) -> Result<bool, StorageError> {
        match fs::metadata(path.as_path()).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::map_io(path.as_path(), "stat", e)),
        }
    }

    async fn delete(&self, path: &FilePath) -> Result<(), StorageError> {
        fs::remove_file(path.as_path())
            .await
            .map_err(|e| Self::map_io(path.as_path(), "delete", e))?;
        debug!(path = %path, "report artifact deleted");
        Ok(())
    }

    fn path_for(&self, project_id: &str, format: ExportFormat, at: DateTime<Utc>) -> FilePath {
        FilePath::new(self.base_path.join(format!(
            "proposal_{}_{}.{}",
            Self::sanitize(project_id),
            at.timestamp_millis(),
            format.extension()
        )))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
