//! Artifact Storage Port - Filesystem operations for compiled reports.
//!
//! This port defines the contract for persisting rendered artifacts. The
//! application depends on this trait, while adapters (like
//! LocalArtifactStorage) provide the implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::artifact_renderer::{ExportFormat, RenderedArtifact};

/// Port for storing rendered artifacts.
///
/// # Contract
///
/// Implementations must:
/// - Write atomically (no partial content on failure)
/// - Compute a SHA-256 checksum of the stored bytes
/// - Reject content above the configured size limit
///
/// # File Organization
///
/// ```text
/// {base_path}/proposal_{project_id}_{timestamp}.{ext}
/// ```
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Write a rendered artifact for `project_id`.
    ///
    /// Creates the base directory if it doesn't exist.
    async fn write(
        &self,
        project_id: &str,
        rendered: &RenderedArtifact,
    ) -> Result<StoredArtifact, StorageError>;

    /// Read stored bytes back.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the file doesn't exist.
    async fn read(&self, path: &FilePath) -> Result<Vec<u8>, StorageError>;

    /// Check if a stored file exists.
    async fn exists(&self, path: &FilePath) -> Result<bool, StorageError>;

    /// Delete a stored file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the file doesn't exist.
    async fn delete(&self, path: &FilePath) -> Result<(), StorageError>;

    /// Path an artifact for `project_id` written at `at` would get.
    fn path_for(&self, project_id: &str, format: ExportFormat, at: DateTime<Utc>) -> FilePath;
}

/// Represents a file path (absolute or relative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilePath(PathBuf);

impl FilePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string (lossy conversion for non-UTF8 paths).
    pub fn to_string_lossy(&self) -> String {
        self.0.to_string_lossy().to_string()
    }

    pub fn as_path(&self) -> &std::path::Path {
        &self.0
    }

    /// Returns the file name without the directory.
    pub fn file_name(&self) -> Option<String> {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

impl From<PathBuf> for FilePath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self::new(PathBuf::from(s))
    }
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArtifact {
    pub path: FilePath,
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the stored bytes.
    pub checksum: String,
    pub format: ExportFormat,
    pub stored_at: DateTime<Utc>,
}

/// Errors that can occur during artifact storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// File was not found.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Permission denied accessing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// Content exceeds the configured limit.
    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl StorageError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(err.to_string())
            }
            _ => StorageError::io(err.to_string()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    // ───────────────────────────────────────────────────────────────
    // FilePath tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn file_path_file_name_extracts_name() {
        let path = FilePath::new("/reports/proposal_P1_20240101T000000Z.html");
        assert_eq!(
            path.file_name(),
            Some("proposal_P1_20240101T000000Z.html".to_string())
        );
        assert_eq!(path.to_string(), "/reports/proposal_P1_20240101T000000Z.html");
    }

    #[test]
    fn file_path_serializes_as_string() {
        let path: FilePath = "uploads/reports/a.txt".into();
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"uploads/reports/a.txt\"");
    }

    // ───────────────────────────────────────────────────────────────
    // StorageError tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn storage_error_file_too_large_displays_sizes() {
        let err = StorageError::file_too_large(10_000_000, 5_000_000);
        assert!(err.to_string().contains("10000000"));
        assert!(err.to_string().contains("5000000"));
    }

    #[test]
    fn storage_error_from_io_error_maps_kinds() {
        let not_found: StorageError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(not_found, StorageError::NotFound { .. }));

        let denied: StorageError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no").into();
        assert!(matches!(denied, StorageError::PermissionDenied { .. }));

        let other: StorageError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(matches!(other, StorageError::Io { .. }));
    }

    #[test]
    fn artifact_storage_is_object_safe() {
        fn check<T: ArtifactStorage + ?Sized>() {}
        check::<dyn ArtifactStorage>();
    }
}
