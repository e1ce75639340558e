//! Paged Renderer Adapter - Implementation of ArtifactRenderer.
//!
//! Encodes a laid-out document as JSON, as standalone HTML with one section
//! per page, or as plain text with pages separated by form feeds.

use std::fmt::Write as _;

use tracing::debug;

use crate::domain::report::{
    escape_html, Align, BlockContent, DocumentArtifact, FontWeight, Page, PageGeometry, RowRole,
    TableCell, TextStyle,
};
use crate::ports::{ArtifactRenderer, ExportError, ExportFormat, RenderedArtifact};

/// Default width of text output, in characters.
pub const DEFAULT_TEXT_COLUMNS: usize = 80;

/// Page separator in text output.
const FORM_FEED: char = '\u{000C}';

#[derive(Debug, Clone)]
pub struct PagedArtifactRenderer {
    text_columns: usize,
}

impl PagedArtifactRenderer {
    pub fn new() -> Self {
        Self {
            text_columns: DEFAULT_TEXT_COLUMNS,
        }
    }

    pub fn with_text_columns(mut self, columns: usize) -> Self {
        self.text_columns = columns.max(20);
        self
    }

    fn to_json(&self, artifact: &DocumentArtifact) -> Result<String, ExportError> {
        serde_json::to_string_pretty(artifact)
            .map_err(|e| ExportError::encoding_failed(ExportFormat::Json, e.to_string()))
    }

    // ───────────────────────────────────────────────────────────────
    // HTML
    // ───────────────────────────────────────────────────────────────

    fn to_html(&self, artifact: &DocumentArtifact) -> Result<String, ExportError> {
        let geometry = artifact.geometry();
        let metadata = artifact.metadata();
        let mut html = String::new();

        writeln!(html, "<!DOCTYPE html>").map_err(html_error)?;
        writeln!(html, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">").map_err(html_error)?;
        writeln!(html, "<title>{}</title>", escape_html(&metadata.title)).map_err(html_error)?;
        writeln!(
            html,
            "<meta name=\"author\" content=\"{}\">\n<meta name=\"subject\" content=\"{}\">\n<meta name=\"keywords\" content=\"{}\">",
            escape_html(&metadata.author),
            escape_html(&metadata.subject),
            escape_html(&metadata.keywords.join(", "))
        )
        .map_err(html_error)?;
        writeln!(html, "<style>\n{}</style>\n</head>\n<body>", page_css(geometry)).map_err(html_error)?;

        for page in artifact.pages() {
            write_html_page(&mut html, page).map_err(html_error)?;
        }

        writeln!(html, "</body>\n</html>").map_err(html_error)?;
        Ok(html)
    }

    // ───────────────────────────────────────────────────────────────
    // Plain text
    // ───────────────────────────────────────────────────────────────

    fn to_text(&self, artifact: &DocumentArtifact) -> String {
        let content_width = artifact.geometry().content_width();
        let pages: Vec<String> = artifact
            .pages()
            .iter()
            .map(|page| self.text_page(page, content_width))
            .collect();
        pages.join(&FORM_FEED.to_string())
    }

    fn text_page(&self, page: &Page, content_width: f32) -> String {
        let mut out = String::new();
        for block in &page.blocks {
            match &block.content {
                BlockContent::Heading { lines, style } | BlockContent::Paragraph { lines, style } => {
                    for line in lines {
                        out.push_str(&self.align(line, style));
                        out.push('\n');
                    }
                    if style.underline {
                        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
                        out.push_str(&"-".repeat(longest));
                        out.push('\n');
                    }
                }
                BlockContent::TableRow { role, cells } => {
                    out.push_str(&self.text_row(*role, cells, content_width));
                }
                BlockContent::Rule { .. } => {
                    out.push_str(&"=".repeat(self.text_columns));
                    out.push('\n');
                }
                BlockContent::Spacer => out.push('\n'),
            }
        }
        if let Some(footer) = &page.footer {
            out.push('\n');
            out.push_str(&center(footer, self.text_columns));
            out.push('\n');
        }
        out
    }

    fn align(&self, line: &str, style: &TextStyle) -> String {
        match style.align {
            Align::Left => line.to_string(),
            Align::Center => center(line, self.text_columns),
        }
    }

    /// Lays cells out side by side, each padded to its share of the page.
    fn text_row(&self, role: RowRole, cells: &[TableCell], content_width: f32) -> String {
        let widths: Vec<usize> = cells
            .iter()
            .map(|cell| {
                let share = cell.width / content_width.max(1.0);
                ((share * self.text_columns as f32).floor() as usize).max(1)
            })
            .collect();
        let height = cells.iter().map(|c| c.lines.len()).max().unwrap_or(0).max(1);

        let mut out = String::new();
        for line_index in 0..height {
            let line: String = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    let text = cell.lines.get(line_index).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", text, width = *width)
                })
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
        if role == RowRole::Header {
            out.push_str(&"-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1)));
            out.push('\n');
        }
        out
    }
}

impl Default for PagedArtifactRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactRenderer for PagedArtifactRenderer {
    fn render(
        &self,
        artifact: &DocumentArtifact,
        format: ExportFormat,
    ) -> Result<RenderedArtifact, ExportError> {
        if artifact.page_count() == 0 {
            return Err(ExportError::invalid_artifact("artifact has no pages"));
        }
        let text = match format {
            ExportFormat::Json => self.to_json(artifact)?,
            ExportFormat::Html => self.to_html(artifact)?,
            ExportFormat::Text => self.to_text(artifact),
        };
        debug!(
            report_id = %artifact.id(),
            format = %format,
            bytes = text.len(),
            "artifact rendered"
        );
        Ok(RenderedArtifact::from_text(text, format))
    }
}

fn html_error(e: std::fmt::Error) -> ExportError {
    ExportError::encoding_failed(ExportFormat::Html, e.to_string())
}

fn center(line: &str, columns: usize) -> String {
    let len = line.chars().count();
    if len >= columns {
        return line.to_string();
    }
    let pad = (columns - len) / 2;
    format!("{}{}", " ".repeat(pad), line)
}

fn page_css(geometry: &PageGeometry) -> String {
    format!(
        "body {{ font-family: Helvetica, Arial, sans-serif; }}\n\
         .page {{ width: {w}pt; min-height: {h}pt; box-sizing: border-box; padding: {t}pt {r}pt {b}pt {l}pt; position: relative; page-break-after: always; break-after: page; }}\n\
         .page:last-child {{ page-break-after: auto; break-after: auto; }}\n\
         .row {{ display: flex; }}\n\
         .row span {{ display: inline-block; box-sizing: border-box; padding-right: 10pt; }}\n\
         .row-header {{ font-weight: bold; border-bottom: 1px solid #000; }}\n\
         .row-total {{ font-weight: bold; margin-top: 6pt; }}\n\
         footer {{ position: absolute; bottom: {fb}pt; left: 0; right: 0; text-align: center; font-size: 10pt; }}\n",
        w = geometry.width,
        h = geometry.height,
        t = geometry.margin_top,
        r = geometry.margin_right,
        b = geometry.margin_bottom,
        l = geometry.margin_left,
        fb = geometry.margin_bottom / 2.0,
    )
}

fn inline_style(style: &TextStyle) -> String {
    let mut css = format!("font-size: {}pt;", style.font.size);
    if style.font.weight == FontWeight::Bold {
        css.push_str(" font-weight: bold;");
    }
    if style.align == Align::Center {
        css.push_str(" text-align: center;");
    }
    if style.underline {
        css.push_str(" text-decoration: underline;");
    }
    css.push_str(&format!(" color: {};", style.color.to_css()));
    css
}

fn joined_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("<br>")
}

fn role_class(role: RowRole) -> &'static str {
    match role {
        RowRole::Header => "row-header",
        RowRole::Item => "row-item",
        RowRole::Placeholder => "row-placeholder",
        RowRole::Total => "row-total",
    }
}

fn write_html_page(html: &mut String, page: &Page) -> std::fmt::Result {
    writeln!(html, "<section class=\"page\" data-page=\"{}\">", page.number)?;
    for block in &page.blocks {
        match &block.content {
            BlockContent::Heading { lines, style } => writeln!(
                html,
                "<h2 style=\"{}\">{}</h2>",
                inline_style(style),
                joined_lines(lines)
            )?,
            BlockContent::Paragraph { lines, style } => writeln!(
                html,
                "<p style=\"{}\">{}</p>",
                inline_style(style),
                joined_lines(lines)
            )?,
            BlockContent::TableRow { role, cells } => {
                write!(html, "<div class=\"row {}\">", role_class(*role))?;
                for cell in cells {
                    write!(
                        html,
                        "<span style=\"width: {}pt; {}\">{}</span>",
                        cell.width,
                        inline_style(&cell.style),
                        joined_lines(&cell.lines)
                    )?;
                }
                writeln!(html, "</div>")?;
            }
            BlockContent::Rule { .. } => writeln!(html, "<hr>")?,
            BlockContent::Spacer => writeln!(html, "<div class=\"spacer\"></div>")?,
        }
    }
    if let Some(footer) = &page.footer {
        writeln!(html, "<footer>{}</footer>", escape_html(footer))?;
    }
    writeln!(html, "</section>")
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::MetricTextMeasurer;
    use crate::domain::proposal::{BudgetItem, ProposalRecord};
    use crate::domain::report::{CompileOptions, DocumentCompiler};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn artifact() -> DocumentArtifact {
        let record = ProposalRecord {
            project_id: "PRJ-9".into(),
            student_name: "Grace <Hopper>".into(),
            project_title: "Compilers".into(),
            budget_items: vec![BudgetItem::new("Books", Decimal::new(40, 0), "Reading").unwrap()],
            ..ProposalRecord::default()
        };
        DocumentCompiler::new(CompileOptions::default(), Arc::new(MetricTextMeasurer::new()))
            .compile_on(
                &record,
                "1. OVERALL ASSESSMENT\nSolid.",
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            )
            .unwrap()
    }

    fn render(format: ExportFormat) -> String {
        let rendered = PagedArtifactRenderer::new().render(&artifact(), format).unwrap();
        assert_eq!(rendered.format, format);
        String::from_utf8(rendered.content).unwrap()
    }

    #[test]
    fn json_round_trips_through_serde() {
        let json = render(ExportFormat::Json);
        let parsed: DocumentArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.page_count(), artifact().page_count());
        assert!(parsed.contains_text("Total Budget: $40.00"));
    }

    #[test]
    fn html_has_one_section_per_page() {
        let html = render(ExportFormat::Html);
        let pages = artifact().page_count();
        assert_eq!(html.matches("<section class=\"page\"").count(), pages);
        assert!(html.contains(&format!("Page 1 of {}", pages)));
        assert!(html.contains("page-break-after: always"));
    }

    #[test]
    fn html_escapes_text() {
        let html = render(ExportFormat::Html);
        assert!(html.contains("Grace &lt;Hopper&gt;"));
        assert!(!html.contains("Grace <Hopper>"));
    }

    #[test]
    fn html_styles_feedback_title_with_accent() {
        let html = render(ExportFormat::Html);
        assert!(html.contains("color: rgb(44, 102, 154);"));
    }

    #[test]
    fn text_separates_pages_with_form_feed() {
        let text = render(ExportFormat::Text);
        let pages: Vec<&str> = text.split(FORM_FEED).collect();
        assert_eq!(pages.len(), artifact().page_count());
        assert!(pages[0].contains("PROJECT PROPOSAL REVIEW"));
        assert!(pages[0].trim_end().ends_with(&format!("Page 1 of {}", pages.len())));
    }

    #[test]
    fn text_centers_title() {
        let text = render(ExportFormat::Text);
        let title = text.lines().next().unwrap();
        assert!(title.starts_with(' '));
        assert_eq!(title.trim(), "PROJECT PROPOSAL REVIEW");
    }

    #[test]
    fn text_table_rows_keep_columns_on_one_line() {
        let text = render(ExportFormat::Text);
        let row = text.lines().find(|l| l.starts_with("Books")).unwrap();
        assert!(row.contains("$40.00"));
        assert!(row.contains("Reading"));
    }
}
