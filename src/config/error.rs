//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Page dimensions must be positive")]
    InvalidPageSize,

    #[error("Margins leave no content area")]
    InvalidMargins,

    #[error("Budget table is {width}pt wide but the content area is {available}pt")]
    ColumnsTooWide { width: f32, available: f32 },

    #[error("Table column widths and padding must be non-negative")]
    InvalidColumns,

    #[error("Reserve threshold must be between 0 and the usable page height")]
    InvalidReserveThreshold,

    #[error("Maximum file size must be greater than zero")]
    InvalidMaxFileSize,

    #[error("Text output needs at least 20 columns")]
    InvalidTextColumns,

    #[error("Invalid from email address")]
    InvalidFromEmail,
}
