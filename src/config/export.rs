//! Export configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::report::ExportFormat;

/// How artifacts are encoded by default
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Format used when none is requested
    pub default_format: ExportFormat,

    /// Line width of text output
    pub text_columns: usize,
}

impl ExportConfig {
    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text_columns < 20 {
            return Err(ValidationError::InvalidTextColumns);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: ExportFormat::Html,
            text_columns: 80,
        }
    }
}
