//! The compiled document artifact.
//!
//! An artifact is an ordered list of pages, each holding blocks that have
//! already been positioned. Once built it is never mutated; renderers only
//! read it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::LayoutError;
use super::style::TextStyle;
use crate::domain::foundation::ReportId;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl PageGeometry {
    /// US Letter with 50pt margins.
    pub const LETTER: PageGeometry = PageGeometry {
        width: 612.0,
        height: 792.0,
        margin_top: 50.0,
        margin_bottom: 50.0,
        margin_left: 50.0,
        margin_right: 50.0,
    };

    /// First y position available for content.
    pub fn content_top(&self) -> f32 {
        self.margin_top
    }

    /// Last y position available for content.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }

    pub fn usable_height(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }

    pub fn content_left(&self) -> f32 {
        self.margin_left
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.margin_right
    }

    pub fn content_width(&self) -> f32 {
        self.content_right() - self.content_left()
    }

    /// Baseline for the page footer, inside the bottom margin.
    pub fn footer_y(&self) -> f32 {
        self.content_bottom() + self.margin_bottom / 5.0
    }

    /// Rejects geometry that leaves no content area.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let values = [
            self.width,
            self.height,
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(LayoutError::invalid_geometry(
                "dimensions must be finite and non-negative",
            ));
        }
        if self.usable_height() <= 0.0 {
            return Err(LayoutError::invalid_geometry("margins leave no vertical space"));
        }
        if self.content_width() <= 0.0 {
            return Err(LayoutError::invalid_geometry("margins leave no horizontal space"));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Role of a budget table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowRole {
    Header,
    Item,
    /// "No budget items provided."
    Placeholder,
    Total,
}

/// One cell of a table row, already wrapped to its column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub x: f32,
    pub width: f32,
    pub lines: Vec<String>,
    pub style: TextStyle,
}

impl TableCell {
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

/// What a placed block draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockContent {
    Heading {
        lines: Vec<String>,
        style: TextStyle,
    },
    Paragraph {
        lines: Vec<String>,
        style: TextStyle,
    },
    TableRow {
        role: RowRole,
        cells: Vec<TableCell>,
    },
    /// Horizontal line across the content width.
    Rule { x_start: f32, x_end: f32 },
    /// Vertical whitespace (blank feedback lines).
    Spacer,
}

impl BlockContent {
    /// Text lines carried by this block, in reading order.
    pub fn text_lines(&self) -> Vec<String> {
        match self {
            BlockContent::Heading { lines, .. } | BlockContent::Paragraph { lines, .. } => {
                lines.clone()
            }
            BlockContent::TableRow { cells, .. } => {
                let row: Vec<String> = cells.iter().map(TableCell::text).collect();
                vec![row.join(" | ")]
            }
            BlockContent::Rule { .. } | BlockContent::Spacer => Vec::new(),
        }
    }
}

/// A block with its vertical position on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub y: f32,
    pub height: f32,
    pub content: BlockContent,
}

impl PlacedBlock {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub blocks: Vec<PlacedBlock>,
    /// "Page N of TOTAL"; assigned once layout is complete.
    pub footer: Option<String>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            blocks: Vec::new(),
            footer: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Descriptive properties embedded in the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: Vec<String>,
    pub project_id: String,
    pub generated_on: NaiveDate,
}

/// The final paginated document for one proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentArtifact {
    id: ReportId,
    metadata: DocumentMetadata,
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl DocumentArtifact {
    /// Assembles an artifact from finished pages. Footers are expected to be set.
    pub(crate) fn new(
        id: ReportId,
        metadata: DocumentMetadata,
        geometry: PageGeometry,
        pages: Vec<Page>,
    ) -> Self {
        Self {
            id,
            metadata,
            geometry,
            pages,
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All blocks in document order, paired with their page number.
    pub fn blocks(&self) -> impl Iterator<Item = (usize, &PlacedBlock)> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter().map(move |block| (page.number, block)))
    }

    /// Every text line in document order (footers excluded).
    pub fn text_lines(&self) -> Vec<String> {
        self.blocks()
            .flat_map(|(_, block)| block.content.text_lines())
            .collect()
    }

    /// True if any block line contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_lines().iter().any(|line| line.contains(needle))
    }

    /// Budget table rows in document order, with their page number.
    pub fn table_rows(&self) -> Vec<(usize, &PlacedBlock)> {
        self.blocks()
            .filter(|(_, block)| matches!(block.content, BlockContent::TableRow { .. }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::style::sheet;

    #[test]
    fn letter_geometry_has_expected_content_area() {
        let g = PageGeometry::LETTER;
        assert_eq!(g.content_top(), 50.0);
        assert_eq!(g.content_bottom(), 742.0);
        assert_eq!(g.content_width(), 512.0);
        assert!(g.footer_y() > g.content_bottom());
        assert!(g.footer_y() < g.height);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn geometry_without_content_area_is_invalid() {
        let g = PageGeometry {
            margin_top: 400.0,
            margin_bottom: 400.0,
            ..PageGeometry::LETTER
        };
        assert!(matches!(g.validate(), Err(LayoutError::InvalidGeometry(_))));

        let g = PageGeometry {
            width: f32::NAN,
            ..PageGeometry::LETTER
        };
        assert!(g.validate().is_err());
    }

    #[test]
    fn table_row_text_joins_cells() {
        let cell = |text: &str| TableCell {
            x: 0.0,
            width: 100.0,
            lines: vec![text.to_string()],
            style: sheet::body(),
        };
        let content = BlockContent::TableRow {
            role: RowRole::Item,
            cells: vec![cell("Laptop"), cell("$900.00"), cell("Needed")],
        };
        assert_eq!(content.text_lines(), vec!["Laptop | $900.00 | Needed"]);
        assert!(BlockContent::Spacer.text_lines().is_empty());
    }
}
