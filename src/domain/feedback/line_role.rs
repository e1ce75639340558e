//! Line classification for free-form feedback text.
//!
//! Feedback arrives as loosely structured text: numbered section headings,
//! labelled sub-points and prose. Every pattern used to recognise that
//! structure lives here; both the document compiler and the feedback
//! extractor go through these rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// "1. OVERALL ASSESSMENT", "4. RISKS & MITIGATION:".
///
/// Only uppercase words (and a little punctuation) may follow the ordinal, so
/// a numbered list item such as "1. Clear objectives" stays body text.
static NUMBERED_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s+[A-Z][A-Z0-9\s&/,'()\-]*:?\s*$").expect("numbered heading pattern")
});

/// "SUMMARY:", "NEXT STEPS:".
///
/// Known weakness: a long all-caps sentence ending in a colon is also a
/// heading. Downstream consumers rely on this rule as-is.
static CAPS_COLON_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z\s]+:$").expect("caps colon heading pattern"));

/// "- Project Title:", "Budget Justification: adequate".
///
/// Every word of the label must be capitalized, so sentence-case prose that
/// happens to contain a colon stays body text.
static SUB_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:-\s+)?[A-Z][A-Za-z]*(?:[ \t]+[A-Z][A-Za-z]*)*:").expect("sub heading pattern")
});

/// Semantic role of a single feedback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    MajorHeading,
    SubHeading,
    /// Prose, list items, and blank lines.
    Body,
}

/// Classifies one line of feedback. Pure and line-local.
pub fn classify_line(line: &str) -> LineRole {
    let line = line.trim_end();
    if line.is_empty() {
        return LineRole::Body;
    }
    if is_major_heading(line) {
        LineRole::MajorHeading
    } else if SUB_HEADING.is_match(line) {
        LineRole::SubHeading
    } else {
        LineRole::Body
    }
}

fn is_major_heading(line: &str) -> bool {
    is_numbered_heading(line) || CAPS_COLON_HEADING.is_match(line)
}

/// True for an ordinal-numbered section heading such as "2. STRENGTHS".
///
/// Unlike [`classify_line`], a bare all-caps label ("NOTE:") does not count.
pub fn is_numbered_heading(line: &str) -> bool {
    NUMBERED_HEADING.is_match(line.trim_end())
}

/// A feedback line paired with its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub text: &'a str,
    pub role: LineRole,
}

impl ClassifiedLine<'_> {
    /// Blank body lines are spacing hints rather than content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Classifies every line of `text`, preserving order and blank lines.
pub fn classify_lines(text: &str) -> Vec<ClassifiedLine<'_>> {
    text.lines()
        .map(|line| ClassifiedLine {
            text: line,
            role: classify_line(line),
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
