//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `document` - Text measurement, artifact encoding and local file storage

pub mod document;

pub use document::{LocalArtifactStorage, MetricTextMeasurer, PagedArtifactRenderer};
