//! Budget table layout.
//!
//! Plans the three-column budget table (description, cost, justification)
//! against the page geometry before anything is placed. Row heights come
//! from wrapped text; a row that would cross the bottom margin moves to the
//! next page, where the header row is repeated first. Rows are never split.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::artifact::{BlockContent, PageGeometry, RowRole, TableCell};
use super::errors::LayoutError;
use super::style::{sheet, Font, TextStyle};
use crate::domain::foundation::{round_amount, CurrencyFormat, ValidationError};
use crate::domain::proposal::BudgetItem;
use crate::ports::TextMeasurer;

/// Text shown instead of an empty table.
pub const NO_BUDGET_ITEMS: &str = "No budget items provided.";

/// Column widths and spacing of the budget table, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableColumns {
    pub description: f32,
    pub cost: f32,
    pub justification: f32,
    /// Horizontal gap kept free on the right of each text column.
    pub cell_gap: f32,
    /// Vertical space added below every row.
    pub row_padding: f32,
}

impl TableColumns {
    pub fn total_width(&self) -> f32 {
        self.description + self.cost + self.justification
    }

    fn description_text_width(&self) -> f32 {
        (self.description - self.cell_gap).max(1.0)
    }

    fn justification_text_width(&self) -> f32 {
        (self.justification - self.cell_gap).max(1.0)
    }

    /// Rejects columns that are degenerate or wider than the content area.
    pub fn validate(&self, geometry: &PageGeometry) -> Result<(), LayoutError> {
        let values = [
            self.description,
            self.cost,
            self.justification,
            self.cell_gap,
            self.row_padding,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(LayoutError::invalid_geometry(
                "table columns must be finite and non-negative",
            ));
        }
        if self.total_width() > geometry.content_width() + 0.01 {
            return Err(LayoutError::invalid_geometry(format!(
                "table width {:.1}pt exceeds content width {:.1}pt",
                self.total_width(),
                geometry.content_width()
            )));
        }
        Ok(())
    }
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            description: 200.0,
            cost: 100.0,
            justification: 200.0,
            cell_gap: 10.0,
            row_padding: 10.0,
        }
    }
}

/// A row with its assigned position.
///
/// `page` is relative to the page the table starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRow {
    pub page: usize,
    pub y: f32,
    pub height: f32,
    pub role: RowRole,
    /// Index into the item list for `RowRole::Item` rows.
    pub item_index: Option<usize>,
    pub cells: Vec<TableCell>,
}

impl PlannedRow {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn into_content(self) -> BlockContent {
        BlockContent::TableRow {
            role: self.role,
            cells: self.cells,
        }
    }
}

/// A page break inserted before the row at `before_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBreak {
    /// Relative page the break starts.
    pub page: usize,
    pub before_row: usize,
}

/// Output of [`BudgetTableLayout::plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct TablePlan {
    pub rows: Vec<PlannedRow>,
    pub breaks: Vec<PageBreak>,
    /// Sum of the cent-rounded item costs shown in the totals row.
    pub total: Decimal,
    /// Relative page and cursor after the last row.
    pub end_page: usize,
    pub end_y: f32,
}

impl TablePlan {
    pub fn rows_with_role(&self, role: RowRole) -> impl Iterator<Item = &PlannedRow> {
        self.rows.iter().filter(move |row| row.role == role)
    }
}

/// Row text and measured height before placement.
#[derive(Clone)]
struct RowDraft {
    role: RowRole,
    item_index: Option<usize>,
    cells: Vec<TableCell>,
    height: f32,
}

/// Plans the budget table for one compilation.
pub struct BudgetTableLayout<'a> {
    geometry: PageGeometry,
    columns: TableColumns,
    currency: &'a CurrencyFormat,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> BudgetTableLayout<'a> {
    pub fn new(
        geometry: PageGeometry,
        columns: TableColumns,
        currency: &'a CurrencyFormat,
        measurer: &'a dyn TextMeasurer,
    ) -> Self {
        Self {
            geometry,
            columns,
            currency,
            measurer,
        }
    }

    fn left(&self) -> f32 {
        self.geometry.content_left()
    }

    fn cell(&self, x: f32, width: f32, lines: Vec<String>, font: Font) -> TableCell {
        TableCell {
            x,
            width,
            lines,
            style: TextStyle::new(font),
        }
    }

    fn single_line_height(&self, font: &Font) -> Result<f32, LayoutError> {
        LayoutError::check_height(self.measurer.line_height(font))
    }

    fn header(&self) -> Result<RowDraft, LayoutError> {
        let font = sheet::TABLE_HEADER;
        let left = self.left();
        let c = &self.columns;
        let cells = vec![
            self.cell(left, c.description, vec!["Item".into()], font),
            self.cell(left + c.description, c.cost, vec!["Cost".into()], font),
            self.cell(
                left + c.description + c.cost,
                c.justification,
                vec!["Justification".into()],
                font,
            ),
        ];
        Ok(RowDraft {
            role: RowRole::Header,
            item_index: None,
            cells,
            height: self.single_line_height(&font)? + c.row_padding,
        })
    }

    /// Drafts one item row.
    ///
    /// A row must fit on a page below the repeated header; an item whose
    /// wrapped text is taller than that is rejected, naming the longer field.
    fn item(&self, index: usize, item: &BudgetItem, header_height: f32) -> Result<RowDraft, LayoutError> {
        if item.cost.is_sign_negative() && !item.cost.is_zero() {
            return Err(ValidationError::negative_amount(
                format!("budget_items[{}].cost", index),
                item.cost,
            )
            .into());
        }
        let font = sheet::TABLE_BODY;
        let left = self.left();
        let c = &self.columns;

        let description = self
            .measurer
            .wrap(&item.description, c.description_text_width(), &font);
        let justification = self
            .measurer
            .wrap(&item.justification, c.justification_text_width(), &font);
        let line_height = self.single_line_height(&font)?;
        let text_lines = description.len().max(justification.len()).max(1);
        let height = LayoutError::check_height(text_lines as f32 * line_height + c.row_padding)?;
        let usable = self.geometry.usable_height();
        if height + header_height > usable {
            let field = if justification.len() >= description.len() {
                "justification"
            } else {
                "description"
            };
            return Err(ValidationError::invalid_format(
                format!("budget_items[{}].{}", index, field),
                format!(
                    "wraps to {:.1}pt, more than the {:.1}pt a table row can use on one page",
                    height,
                    usable - header_height
                ),
            )
            .into());
        }

        let cells = vec![
            self.cell(left, c.description, description, font),
            self.cell(
                left + c.description,
                c.cost,
                vec![self.currency.format(item.cost)],
                font,
            ),
            self.cell(left + c.description + c.cost, c.justification, justification, font),
        ];
        Ok(RowDraft {
            role: RowRole::Item,
            item_index: Some(index),
            cells,
            height,
        })
    }

    fn placeholder(&self) -> Result<RowDraft, LayoutError> {
        let font = sheet::BODY;
        Ok(RowDraft {
            role: RowRole::Placeholder,
            item_index: None,
            cells: vec![self.cell(
                self.left(),
                self.columns.total_width(),
                vec![NO_BUDGET_ITEMS.into()],
                font,
            )],
            height: self.single_line_height(&font)? + self.columns.row_padding,
        })
    }

    fn totals(&self, total: Decimal) -> Result<RowDraft, LayoutError> {
        let font = sheet::TABLE_HEADER;
        Ok(RowDraft {
            role: RowRole::Total,
            item_index: None,
            cells: vec![self.cell(
                self.left(),
                self.columns.total_width(),
                vec![format!("Total Budget: {}", self.currency.format(total))],
                font,
            )],
            height: self.single_line_height(&font)? + self.columns.row_padding,
        })
    }

    /// Plans every row of the table starting at `start_y` on the current page.
    pub fn plan(&self, items: &[BudgetItem], start_y: f32) -> Result<TablePlan, LayoutError> {
        self.columns.validate(&self.geometry)?;

        let total: Decimal = items.iter().map(|item| round_amount(item.cost)).sum();
        let mut planner = RowPlanner::new(&self.geometry, start_y);

        if items.is_empty() {
            planner.push(self.placeholder()?, None)?;
            planner.push(self.totals(total)?, None)?;
            return Ok(planner.finish(total));
        }

        let header = self.header()?;
        let drafts = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.item(index, item, header.height))
            .collect::<Result<Vec<_>, _>>()?;

        // Keep the opening header on the same page as the first row
        let opening = header.height + drafts[0].height;
        if planner.would_overflow(opening) {
            planner.break_page(None)?;
        }
        planner.push(self.header()?, None)?;

        for draft in drafts {
            planner.push(draft, Some(&header))?;
        }
        planner.push(self.totals(total)?, Some(&header))?;

        Ok(planner.finish(total))
    }
}

/// Cursor bookkeeping for [`BudgetTableLayout::plan`].
struct RowPlanner<'g> {
    geometry: &'g PageGeometry,
    page: usize,
    cursor: f32,
    rows: Vec<PlannedRow>,
    breaks: Vec<PageBreak>,
}

impl<'g> RowPlanner<'g> {
    fn new(geometry: &'g PageGeometry, start_y: f32) -> Self {
        Self {
            geometry,
            page: 0,
            cursor: start_y,
            rows: Vec::new(),
            breaks: Vec::new(),
        }
    }

    fn would_overflow(&self, height: f32) -> bool {
        self.cursor + height > self.geometry.content_bottom()
    }

    fn break_page(&mut self, header: Option<&RowDraft>) -> Result<(), LayoutError> {
        self.page += 1;
        self.cursor = self.geometry.content_top();
        self.breaks.push(PageBreak {
            page: self.page,
            before_row: self.rows.len(),
        });
        debug!(page = self.page, before_row = self.rows.len(), "budget table page break");
        if let Some(header) = header {
            self.place(header.clone());
        }
        Ok(())
    }

    /// Places `draft`, breaking first when it would cross the bottom margin.
    fn push(&mut self, draft: RowDraft, repeat_header: Option<&RowDraft>) -> Result<(), LayoutError> {
        let header_height = repeat_header.map(|h| h.height).unwrap_or(0.0);
        let usable = self.geometry.usable_height();
        if draft.height + header_height > usable {
            return Err(LayoutError::BlockTooTall {
                height: draft.height + header_height,
                usable,
            });
        }
        if self.would_overflow(draft.height) {
            self.break_page(repeat_header)?;
        }
        self.place(draft);
        Ok(())
    }

    fn place(&mut self, draft: RowDraft) {
        self.rows.push(PlannedRow {
            page: self.page,
            y: self.cursor,
            height: draft.height,
            role: draft.role,
            item_index: draft.item_index,
            cells: draft.cells,
        });
        self.cursor += draft.height;
    }

    fn finish(self, total: Decimal) -> TablePlan {
        TablePlan {
            rows: self.rows,
            breaks: self.breaks,
            total,
            end_page: self.page,
            end_y: self.cursor,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::MetricTextMeasurer;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(description: &str, cost: &str, justification: &str) -> BudgetItem {
        BudgetItem::new(description, dec(cost), justification).unwrap()
    }

    fn plan(items: &[BudgetItem], start_y: f32) -> Result<TablePlan, LayoutError> {
        let measurer = MetricTextMeasurer::new();
        let currency = CurrencyFormat::default();
        BudgetTableLayout::new(
            PageGeometry::LETTER,
            TableColumns::default(),
            &currency,
            &measurer,
        )
        .plan(items, start_y)
    }

    fn cost_cell(row: &PlannedRow) -> String {
        row.cells[1].text()
    }

    // ───────────────────────────────────────────────────────────────
    // Basic shape
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn header_items_then_total() {
        let items = vec![item("Laptop", "900", "Analysis"), item("Sensors", "12.5", "Data")];
        let plan = plan(&items, 100.0).unwrap();

        let roles: Vec<RowRole> = plan.rows.iter().map(|r| r.role).collect();
        assert_eq!(
            roles,
            vec![RowRole::Header, RowRole::Item, RowRole::Item, RowRole::Total]
        );
        assert!(plan.breaks.is_empty());
        assert_eq!(plan.rows[0].y, 100.0);
        assert_eq!(cost_cell(&plan.rows[2]), "$12.50");
        assert_eq!(plan.rows[3].cells[0].text(), "Total Budget: $912.50");
    }

    #[test]
    fn sub_cent_costs_total_what_the_rows_show() {
        let items = vec![item("Clips", "0.005", "x"), item("Pins", "0.005", "y")];
        let plan = plan(&items, 100.0).unwrap();

        assert_eq!(cost_cell(&plan.rows[1]), "$0.01");
        assert_eq!(cost_cell(&plan.rows[2]), "$0.01");
        assert_eq!(plan.total, dec("0.02"));
        assert_eq!(plan.rows[3].cells[0].text(), "Total Budget: $0.02");
    }

    #[test]
    fn rows_are_stacked_without_gaps() {
        let items = vec![item("A", "1", "x"), item("B", "2", "y")];
        let plan = plan(&items, 100.0).unwrap();
        for pair in plan.rows.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].y);
        }
        assert_eq!(plan.end_y, plan.rows.last().unwrap().bottom());
    }

    #[test]
    fn zero_items_render_placeholder_and_zero_total() {
        let plan = plan(&[], 100.0).unwrap();
        assert_eq!(plan.rows.len(), 2);
        assert_eq!(plan.rows[0].role, RowRole::Placeholder);
        assert_eq!(plan.rows[0].cells[0].text(), NO_BUDGET_ITEMS);
        assert_eq!(plan.rows[1].role, RowRole::Total);
        assert!(plan.rows[1].cells[0].text().ends_with("0.00"));
        assert_eq!(plan.rows_with_role(RowRole::Header).count(), 0);
    }

    #[test]
    fn row_height_follows_tallest_wrapped_column() {
        let measurer = MetricTextMeasurer::new();
        let line = measurer.line_height(&sheet::TABLE_BODY);
        let long = "Needed to cover travel to three partner sites for interviews and data collection during the survey phase";
        let lines = measurer.wrap(long, 190.0, &sheet::TABLE_BODY).len();
        assert!(lines >= 4);

        let plan = plan(&[item("Travel", "300", long)], 100.0).unwrap();
        let row = &plan.rows[1];
        assert!(row.height >= 4.0 * line);
        assert_eq!(row.height, lines as f32 * line + 10.0);
    }

    #[test]
    fn negative_cost_fails_loudly() {
        let bad = BudgetItem {
            description: "Refund".into(),
            cost: dec("-5"),
            justification: String::new(),
        };
        assert!(matches!(
            plan(&[bad], 100.0),
            Err(LayoutError::InvalidInput(_))
        ));
    }

    #[test]
    fn oversized_row_is_rejected_naming_the_field() {
        let huge = "word ".repeat(600);
        let err = plan(&[item("Ok", "1", "fine"), item("Huge", "1", &huge)], 100.0).unwrap_err();
        match err {
            LayoutError::InvalidInput(ValidationError::InvalidFormat { field, .. }) => {
                assert_eq!(field, "budget_items[1].justification");
            }
            other => panic!("unexpected error {:?}", other),
        }

        let err = plan(&[item(&huge, "1", "fine")], 100.0).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidInput(ValidationError::InvalidFormat { ref field, .. })
                if field == "budget_items[0].description"
        ));
    }

    #[test]
    fn columns_wider_than_page_are_rejected() {
        let columns = TableColumns {
            description: 400.0,
            ..TableColumns::default()
        };
        assert!(columns.validate(&PageGeometry::LETTER).is_err());
        assert!(TableColumns::default().validate(&PageGeometry::LETTER).is_ok());
    }

    // ───────────────────────────────────────────────────────────────
    // Pagination
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn break_repeats_header_before_the_row() {
        let items: Vec<BudgetItem> = (0..60)
            .map(|i| item(&format!("Item {}", i), "10", "Needed"))
            .collect();
        let plan = plan(&items, 100.0).unwrap();

        assert!(!plan.breaks.is_empty());
        for brk in &plan.breaks {
            let header = &plan.rows[brk.before_row];
            assert_eq!(header.role, RowRole::Header);
            assert_eq!(header.page, brk.page);
            assert_eq!(header.y, PageGeometry::LETTER.content_top());
            assert_ne!(plan.rows[brk.before_row + 1].role, RowRole::Header);
        }
    }

    #[test]
    fn opening_header_moves_with_first_row() {
        let items = vec![item("Laptop", "900", "Analysis")];
        let bottom = PageGeometry::LETTER.content_bottom();
        let plan = plan(&items, bottom - 25.0).unwrap();

        assert_eq!(plan.rows[0].role, RowRole::Header);
        assert_eq!(plan.rows[0].page, 1);
        assert_eq!(plan.rows[1].page, 1);
        assert_eq!(plan.breaks.len(), 1);
    }

    #[test]
    fn totals_row_breaks_with_header() {
        let measurer = MetricTextMeasurer::new();
        let header_h = measurer.line_height(&sheet::TABLE_HEADER) + 10.0;
        let row_h = measurer.line_height(&sheet::TABLE_BODY) + 10.0;
        let bottom = PageGeometry::LETTER.content_bottom();
        // Header and item fit, the totals row does not
        let start = bottom - header_h - row_h - 1.0;
        let plan = plan(&[item("A", "1", "x")], start).unwrap();

        let total = plan.rows.last().unwrap();
        assert_eq!(total.role, RowRole::Total);
        assert_eq!(total.page, 1);
        assert_eq!(plan.rows[plan.rows.len() - 2].role, RowRole::Header);
    }

    proptest! {
        #[test]
        fn totals_equal_sum_of_rendered_costs(
            costs in prop::collection::vec((0i64..100_000_000, 0u32..5), 0..40),
            start in 50.0f32..700.0,
        ) {
            let items: Vec<BudgetItem> = costs
                .iter()
                .map(|(units, scale)| item("Item", &Decimal::new(*units, *scale).to_string(), "Reason"))
                .collect();
            let plan = plan(&items, start).unwrap();
            let currency = CurrencyFormat::default();

            let rendered_sum: Decimal = plan
                .rows_with_role(RowRole::Item)
                .map(|row| currency.parse(&cost_cell(row)).unwrap())
                .sum();
            let total_text = plan.rows_with_role(RowRole::Total).next().unwrap().cells[0].text();
            let total = currency
                .parse(total_text.trim_start_matches("Total Budget: "))
                .unwrap();
            prop_assert_eq!(rendered_sum, total);
            prop_assert_eq!(plan.rows_with_role(RowRole::Item).count(), items.len());
        }

        #[test]
        fn no_row_crosses_the_bottom_margin(
            words in prop::collection::vec(1usize..60, 1..30),
            start in 50.0f32..740.0,
        ) {
            let items: Vec<BudgetItem> = words
                .iter()
                .map(|n| item("Item", "1", &"justify ".repeat(*n)))
                .collect();
            let plan = plan(&items, start).unwrap();
            let geometry = PageGeometry::LETTER;
            for row in &plan.rows {
                prop_assert!(row.bottom() <= geometry.content_bottom());
                if row.page > 0 {
                    prop_assert!(row.y >= geometry.content_top());
                }
            }
        }
    }
}
