//! Summary compiler.
//!
//! Condenses the numbered feedback sections into a short HTML fragment for an
//! email body. Never fails: missing sections are skipped, and the fragment
//! always ends with the closing note.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::html::escape_html;
use crate::domain::feedback::FeedbackDigest;

/// Closing paragraph appended to every summary.
pub const CLOSING_NOTE: &str = "<p><em>For complete feedback and detailed recommendations, please review the attached document.</em></p>";

/// Shown when the feedback text is blank.
pub const EMPTY_FEEDBACK_NOTE: &str =
    "<p>Feedback analysis complete. Please check the attached document for details.</p>";

/// HTML excerpt of the feedback, ready to embed in an email body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryFragment(String);

impl SummaryFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SummaryFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SummaryFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryCompiler;

impl SummaryCompiler {
    pub fn new() -> Self {
        Self
    }

    pub fn compile(&self, feedback: &str) -> SummaryFragment {
        if feedback.trim().is_empty() {
            return SummaryFragment(format!("{}{}", EMPTY_FEEDBACK_NOTE, CLOSING_NOTE));
        }
        self.render(&FeedbackDigest::extract(feedback))
    }

    /// Renders an already extracted digest.
    pub fn render(&self, digest: &FeedbackDigest) -> SummaryFragment {
        let mut html = String::new();

        if let Some(overall) = &digest.overall {
            html.push_str("<p><strong>Overall:</strong> ");
            html.push_str(&escape_html(overall));
            html.push_str("</p>");
        }
        push_list(&mut html, "Key Strengths:", &digest.strengths);
        push_list(&mut html, "Areas for Improvement:", &digest.improvements);

        html.push_str(CLOSING_NOTE);
        SummaryFragment(html)
    }
}

fn push_list(html: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    html.push_str("<p><strong>");
    html.push_str(title);
    html.push_str("</strong></p><ul>");
    for item in items {
        html.push_str("<li>");
        html.push_str(&escape_html(item));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "1. OVERALL ASSESSMENT\nGood work overall\n\n2. STRENGTHS\n- Clear objectives\n- Strong methodology\n\n3. AREAS FOR IMPROVEMENT\n- Add more references\n";

    #[test]
    fn renders_all_three_sections_in_order() {
        let html = SummaryCompiler::new().compile(SCENARIO_A).into_string();

        assert!(html.starts_with("<p><strong>Overall:</strong> Good work overall</p>"));
        let strengths = html.find("Key Strengths:").unwrap();
        let improvements = html.find("Areas for Improvement:").unwrap();
        assert!(strengths < improvements);
        assert_eq!(html.matches("<li>").count(), 3);
        assert!(html.contains("<li>Clear objectives</li><li>Strong methodology</li>"));
        assert!(html.contains("<li>Add more references</li>"));
        assert!(html.ends_with(CLOSING_NOTE));
    }

    #[test]
    fn missing_sections_are_skipped() {
        let html = SummaryCompiler::new()
            .compile("2. STRENGTHS\n- Only this\n")
            .into_string();
        assert!(!html.contains("Overall:"));
        assert!(!html.contains("Areas for Improvement:"));
        assert!(html.contains("<li>Only this</li>"));
    }

    #[test]
    fn unstructured_feedback_still_gets_closing_note() {
        let html = SummaryCompiler::new().compile("just some notes").into_string();
        assert_eq!(html, CLOSING_NOTE);
    }

    #[test]
    fn blank_feedback_gets_completion_note() {
        let html = SummaryCompiler::new().compile("  \n ").into_string();
        assert!(html.starts_with(EMPTY_FEEDBACK_NOTE));
        assert!(html.ends_with(CLOSING_NOTE));
    }

    #[test]
    fn extracted_text_is_escaped() {
        let html = SummaryCompiler::new()
            .compile("1. OVERALL ASSESSMENT\n<script>alert(1)</script>\n")
            .into_string();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
