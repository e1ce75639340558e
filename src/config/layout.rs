//! Page layout configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::CurrencyFormat;
use crate::domain::report::{CompileOptions, PageGeometry, TableColumns};

/// Page geometry, budget table columns and section spacing, in points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,

    /// Budget table column widths
    pub description_column: f32,
    pub cost_column: f32,
    pub justification_column: f32,
    pub cell_gap: f32,
    pub row_padding: f32,

    /// Space that must remain before the timeline, stakeholders and references
    pub reserve_threshold: f32,

    pub currency_symbol: String,

    /// Leave out the references section when it is blank
    pub omit_empty_references: bool,

    /// Author embedded in document metadata
    pub author: String,
}

impl LayoutConfig {
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            width: self.page_width,
            height: self.page_height,
            margin_top: self.margin_top,
            margin_bottom: self.margin_bottom,
            margin_left: self.margin_left,
            margin_right: self.margin_right,
        }
    }

    pub fn columns(&self) -> TableColumns {
        TableColumns {
            description: self.description_column,
            cost: self.cost_column,
            justification: self.justification_column,
            cell_gap: self.cell_gap,
            row_padding: self.row_padding,
        }
    }

    /// Options for the document compiler.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            geometry: self.geometry(),
            columns: self.columns(),
            reserve_threshold: self.reserve_threshold,
            currency: CurrencyFormat::new(self.currency_symbol.clone()),
            omit_empty_references: self.omit_empty_references,
            author: self.author.clone(),
        }
    }

    /// Validate layout configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.page_width > 0.0 && self.page_height > 0.0)
            || !self.page_width.is_finite()
            || !self.page_height.is_finite()
        {
            return Err(ValidationError::InvalidPageSize);
        }
        let geometry = self.geometry();
        let margins = [
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
        ];
        if margins.iter().any(|m| *m < 0.0)
            || geometry.content_width() <= 0.0
            || geometry.usable_height() <= 0.0
        {
            return Err(ValidationError::InvalidMargins);
        }

        let columns = self.columns();
        let parts = [
            columns.description,
            columns.cost,
            columns.justification,
            columns.cell_gap,
            columns.row_padding,
        ];
        if parts.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(ValidationError::InvalidColumns);
        }
        if columns.total_width() > geometry.content_width() {
            return Err(ValidationError::ColumnsTooWide {
                width: columns.total_width(),
                available: geometry.content_width(),
            });
        }

        if self.reserve_threshold < 0.0 || self.reserve_threshold > geometry.usable_height() {
            return Err(ValidationError::InvalidReserveThreshold);
        }
        if self.currency_symbol.is_empty() {
            return Err(ValidationError::MissingRequired("LAYOUT__CURRENCY_SYMBOL"));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let page = PageGeometry::LETTER;
        let columns = TableColumns::default();
        let options = CompileOptions::default();
        Self {
            page_width: page.width,
            page_height: page.height,
            margin_top: page.margin_top,
            margin_bottom: page.margin_bottom,
            margin_left: page.margin_left,
            margin_right: page.margin_right,
            description_column: columns.description,
            cost_column: columns.cost,
            justification_column: columns.justification,
            cell_gap: columns.cell_gap,
            row_padding: columns.row_padding,
            reserve_threshold: options.reserve_threshold,
            currency_symbol: options.currency.symbol().to_string(),
            omit_empty_references: options.omit_empty_references,
            author: options.author,
        }
    }
}
