//! Section extraction from feedback text.
//!
//! A best-effort parse: it looks for `<ordinal>. <SECTION NAME>` headings and
//! collects the lines that follow. Anything it cannot find comes back empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::line_role::is_numbered_heading;

/// Leading "-" or "3." marker of a list item.
static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:-|\d+\.)\s*(.*)$").expect("list marker pattern"));

/// How a section's lines are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Free prose, joined into one paragraph.
    Narrative,
    /// Bullet or numbered items only.
    List,
}

/// Feedback sections used in the email summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSection {
    OverallAssessment,
    Strengths,
    AreasForImprovement,
}

impl FeedbackSection {
    /// All summary sections in rendering order.
    pub const ALL: [FeedbackSection; 3] = [
        FeedbackSection::OverallAssessment,
        FeedbackSection::Strengths,
        FeedbackSection::AreasForImprovement,
    ];

    /// The number the feedback uses for this section.
    pub fn ordinal(&self) -> u32 {
        match self {
            FeedbackSection::OverallAssessment => 1,
            FeedbackSection::Strengths => 2,
            FeedbackSection::AreasForImprovement => 3,
        }
    }

    /// The heading text following the ordinal.
    pub fn heading(&self) -> &'static str {
        match self {
            FeedbackSection::OverallAssessment => "OVERALL ASSESSMENT",
            FeedbackSection::Strengths => "STRENGTHS",
            FeedbackSection::AreasForImprovement => "AREAS FOR IMPROVEMENT",
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            FeedbackSection::OverallAssessment => SectionKind::Narrative,
            FeedbackSection::Strengths | FeedbackSection::AreasForImprovement => SectionKind::List,
        }
    }
}

/// Builds the case-insensitive heading matcher for `<ordinal>. <name>`.
fn heading_pattern(ordinal: u32, name: &str) -> Option<Regex> {
    let words: Vec<String> = name.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let pattern = format!(
        r"(?i)^\s*{}\.\s+{}\b\s*:?\s*(.*)$",
        ordinal,
        words.join(r"\s+")
    );
    Regex::new(&pattern).ok()
}

/// Returns the raw lines of the block headed by `<ordinal>. <name>`.
///
/// Text after the heading on the same line counts as the first line. The
/// block runs until the next blank line, the next numbered heading, or the
/// end of the text. A blank line right under the heading leaves it empty.
pub fn extract_block<'a>(text: &'a str, ordinal: u32, name: &str) -> Vec<&'a str> {
    let Some(heading) = heading_pattern(ordinal, name) else {
        return Vec::new();
    };

    let mut lines = text.lines();
    let mut block = Vec::new();

    let Some(remainder) = lines.by_ref().find_map(|line| {
        heading
            .captures(line)
            .map(|caps| caps.get(1).map(|m| m.as_str()).unwrap_or(""))
    }) else {
        return block;
    };

    let remainder = remainder.trim();
    if !remainder.is_empty() {
        block.push(remainder);
    }

    for line in lines {
        if line.trim().is_empty() || is_numbered_heading(line) {
            break;
        }
        block.push(line);
    }

    block
}

/// Strips a leading "-" or "N." marker, or returns `None` for non-list lines.
fn strip_list_marker(line: &str) -> Option<&str> {
    LIST_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|item| !item.is_empty())
}

/// Extracts one section's content.
///
/// Narrative sections yield at most one entry (the joined paragraph); list
/// sections yield one entry per item.
pub fn extract_section(text: &str, section: FeedbackSection) -> Vec<String> {
    let block = extract_block(text, section.ordinal(), section.heading());
    match section.kind() {
        SectionKind::Narrative => {
            let paragraph = block
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if paragraph.is_empty() {
                Vec::new()
            } else {
                vec![paragraph]
            }
        }
        SectionKind::List => block
            .iter()
            .filter_map(|line| strip_list_marker(line))
            .map(str::to_string)
            .collect(),
    }
}

/// The three summary sections pulled out of one feedback text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackDigest {
    pub overall: Option<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl FeedbackDigest {
    /// Extracts every summary section. Never fails.
    pub fn extract(text: &str) -> Self {
        Self {
            overall: extract_section(text, FeedbackSection::OverallAssessment)
                .into_iter()
                .next(),
            strengths: extract_section(text, FeedbackSection::Strengths),
            improvements: extract_section(text, FeedbackSection::AreasForImprovement),
        }
    }

    /// True when no section was found.
    pub fn is_empty(&self) -> bool {
        self.overall.is_none() && self.strengths.is_empty() && self.improvements.is_empty()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
