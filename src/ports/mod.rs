//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextMeasurer` - Line wrapping and line height for layout
//! - `ArtifactRenderer` - Encoding compiled documents (JSON, HTML, text)
//! - `ArtifactStorage` - Persisting rendered artifacts

mod artifact_renderer;
mod artifact_storage;
mod text_measurer;

pub use artifact_renderer::{ArtifactRenderer, ExportError, ExportFormat, RenderedArtifact};
pub use artifact_storage::{ArtifactStorage, FilePath, StorageError, StoredArtifact};
pub use text_measurer::TextMeasurer;
