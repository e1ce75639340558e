//! Document adapters - Implementations for measuring, encoding and storing reports.
//!
//! This module provides adapters for the report-related ports:
//! - `MetricTextMeasurer` - Average-glyph text measurement over `textwrap`
//! - `PagedArtifactRenderer` - Encodes artifacts as JSON, HTML or text
//! - `LocalArtifactStorage` - Stores rendered artifacts on the local filesystem

mod local_artifact_storage;
mod metric_text_measurer;
mod paged_renderer;

pub use local_artifact_storage::{LocalArtifactStorage, DEFAULT_MAX_FILE_SIZE_BYTES};
pub use metric_text_measurer::MetricTextMeasurer;
pub use paged_renderer::{PagedArtifactRenderer, DEFAULT_TEXT_COLUMNS};
