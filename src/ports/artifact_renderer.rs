//! Artifact Renderer Port - Encoding compiled documents.
//!
//! This port defines the contract for turning a laid-out
//! [`DocumentArtifact`] into bytes in one of the supported export formats.
//! Layout is already final when a renderer sees the artifact; renderers only
//! choose an encoding for the placed blocks.

use thiserror::Error;

use crate::domain::report::DocumentArtifact;

pub use crate::domain::report::ExportFormat;

/// Port for encoding a compiled document.
///
/// # Contract
///
/// Implementations must:
/// - Preserve page order and block order within each page
/// - Emit every page footer
/// - Escape text for formats with markup
///
/// # Usage
///
/// ```rust,ignore
/// let renderer: &dyn ArtifactRenderer = get_renderer();
/// let rendered = renderer.render(&artifact, ExportFormat::Html)?;
/// storage.write(&record.project_id, &rendered).await?;
/// ```
pub trait ArtifactRenderer: Send + Sync {
    /// Encode `artifact` in `format`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if encoding fails.
    fn render(
        &self,
        artifact: &DocumentArtifact,
        format: ExportFormat,
    ) -> Result<RenderedArtifact, ExportError>;
}

/// Encoded artifact with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// The encoded content.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl RenderedArtifact {
    /// Create a rendered artifact for `format`.
    pub fn new(content: Vec<u8>, format: ExportFormat) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            format,
        }
    }

    /// Create from text content.
    pub fn from_text(text: String, format: ExportFormat) -> Self {
        Self::new(text.into_bytes(), format)
    }

    /// Size of the encoded content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Errors that can occur while encoding an artifact.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Serialization of the artifact failed.
    #[error("Encoding to {format} failed: {reason}")]
    EncodingFailed { format: ExportFormat, reason: String },

    /// The artifact is not in a state that can be encoded.
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),
}

impl ExportError {
    /// Create an encoding error.
    pub fn encoding_failed(format: ExportFormat, reason: impl Into<String>) -> Self {
        Self::EncodingFailed {
            format,
            reason: reason.into(),
        }
    }

    /// Create an invalid artifact error.
    pub fn invalid_artifact(reason: impl Into<String>) -> Self {
        Self::InvalidArtifact(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
