//! Artifact storage configuration

use std::path::PathBuf;

use serde::Deserialize;

use super::error::ValidationError;

/// Where rendered reports are written
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for stored artifacts
    pub base_dir: String,

    /// Largest artifact accepted, in bytes
    pub max_file_size_bytes: u64,
}

impl StorageConfig {
    pub fn base_path(&self) -> PathBuf {
        PathBuf::from(&self.base_dir)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_dir.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__BASE_DIR"));
        }
        if self.max_file_size_bytes == 0 {
            return Err(ValidationError::InvalidMaxFileSize);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: "uploads/reports".to_string(),
            max_file_size_bytes: 10 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.base_path(), PathBuf::from("uploads/reports"));
        assert_eq!(config.max_file_size_bytes, 10_485_760);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_base_dir() {
        let config = StorageConfig {
            base_dir: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_size_limit() {
        let config = StorageConfig {
            max_file_size_bytes: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxFileSize));
    }
}
