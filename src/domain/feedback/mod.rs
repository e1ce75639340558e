//! Feedback module - recovering structure from free-form assessment text.
//!
//! - `line_role` - per-line classification (heading, sub-heading, body)
//! - `extractor` - named section extraction for the email summary

mod extractor;
mod line_role;

pub use extractor::{extract_block, extract_section, FeedbackDigest, FeedbackSection, SectionKind};
pub use line_role::{classify_line, classify_lines, is_numbered_heading, ClassifiedLine, LineRole};
