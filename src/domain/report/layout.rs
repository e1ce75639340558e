//! Compilation-scoped layout state.
//!
//! `LayoutContext` owns the page list and the vertical cursor for exactly one
//! compilation. It is created by the compiler, threaded through every layout
//! call by `&mut`, and consumed by [`LayoutContext::finish`], which runs the
//! second pass that numbers pages.

use tracing::debug;

use super::artifact::{BlockContent, DocumentArtifact, DocumentMetadata, Page, PageGeometry, PlacedBlock};
use super::errors::LayoutError;
use super::style::{Font, TextStyle};
use crate::domain::foundation::ReportId;
use crate::ports::TextMeasurer;

/// Tolerance for floating point comparisons against page bounds.
const EPSILON: f32 = 0.01;

pub struct LayoutContext<'m> {
    geometry: PageGeometry,
    measurer: &'m dyn TextMeasurer,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'m> LayoutContext<'m> {
    /// Starts a layout on a fresh first page.
    pub fn new(geometry: PageGeometry, measurer: &'m dyn TextMeasurer) -> Result<Self, LayoutError> {
        geometry.validate()?;
        Ok(Self {
            geometry,
            measurer,
            pages: vec![Page::new(1)],
            cursor: geometry.content_top(),
        })
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn measurer(&self) -> &'m dyn TextMeasurer {
        self.measurer
    }

    /// Current vertical position on the current page.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// 0-based index of the page being filled.
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// Vertical space left above the bottom margin.
    pub fn remaining(&self) -> f32 {
        self.geometry.content_bottom() - self.cursor
    }

    fn current_page(&self) -> &Page {
        // `pages` starts with one page and only grows
        &self.pages[self.pages.len() - 1]
    }

    fn current_page_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Starts a new page unconditionally.
    pub fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        debug!(page = number, "starting new page");
        self.pages.push(Page::new(number));
        self.cursor = self.geometry.content_top();
    }

    /// Starts a new page unless the current one is still empty.
    pub fn page_break(&mut self) {
        if !self.current_page().is_empty() {
            self.new_page();
        }
    }

    /// Breaks the page when less than `threshold` points remain.
    pub fn reserve(&mut self, threshold: f32) {
        if self.remaining() < threshold {
            self.page_break();
        }
    }

    /// Makes room for an unsplittable block of `height`, breaking the page if needed.
    ///
    /// Returns whether a page break happened.
    pub fn ensure_space(&mut self, height: f32) -> Result<bool, LayoutError> {
        let height = LayoutError::check_height(height)?;
        let usable = self.geometry.usable_height();
        if height > usable + EPSILON {
            return Err(LayoutError::BlockTooTall { height, usable });
        }
        if self.cursor + height > self.geometry.content_bottom() + EPSILON {
            self.new_page();
            return Ok(true);
        }
        Ok(false)
    }

    /// Moves the cursor forward to `y` on the current page.
    pub fn advance_to(&mut self, y: f32) -> Result<(), LayoutError> {
        if y + EPSILON < self.cursor {
            return Err(LayoutError::CursorRegression {
                from: self.cursor,
                to: y,
            });
        }
        self.cursor = y;
        Ok(())
    }

    /// Adds vertical whitespace of `lines` line heights in `font`.
    ///
    /// The cursor may end past the bottom margin; the next placement breaks.
    pub fn move_down(&mut self, lines: f32, font: &Font) {
        self.cursor += lines * self.measurer.line_height(font);
    }

    /// Places `content` at the cursor and advances past it.
    ///
    /// The caller must have made room; a block crossing the bottom margin is
    /// an invariant violation.
    pub fn place(&mut self, content: BlockContent, height: f32) -> Result<(), LayoutError> {
        let height = LayoutError::check_height(height)?;
        let bottom = self.geometry.content_bottom();
        if self.cursor + height > bottom + EPSILON {
            return Err(LayoutError::Overflow {
                page: self.pages.len(),
                y: self.cursor,
                height,
                bottom,
            });
        }
        let y = self.cursor;
        self.current_page_mut().blocks.push(PlacedBlock { y, height, content });
        self.cursor = y + height;
        Ok(())
    }

    /// Places a heading, never split across pages.
    ///
    /// A heading taller than a whole page cannot be kept together; it flows
    /// like a paragraph in the heading style instead.
    pub fn heading(&mut self, text: &str, style: TextStyle) -> Result<(), LayoutError> {
        let width = self.geometry.content_width();
        let lines = self.measurer.wrap(text, width, &style.font);
        let height = LayoutError::check_height(
            lines.len() as f32 * self.measurer.line_height(&style.font),
        )?;
        if height > self.geometry.usable_height() + EPSILON {
            debug!(height, "heading taller than a page, flowing it");
            return self.paragraph(text, style);
        }
        self.ensure_space(height)?;
        self.place(BlockContent::Heading { lines, style }, height)
    }

    /// Places a paragraph, flowing onto following pages line by line.
    pub fn paragraph(&mut self, text: &str, style: TextStyle) -> Result<(), LayoutError> {
        let width = self.geometry.content_width();
        let line_height = LayoutError::check_height(self.measurer.line_height(&style.font))?;
        let mut lines = self.measurer.wrap(text, width, &style.font);

        while !lines.is_empty() {
            let fitting = if line_height > 0.0 {
                ((self.remaining() + EPSILON) / line_height).floor().max(0.0) as usize
            } else {
                lines.len()
            };
            if fitting == 0 {
                // A single line must fit on an empty page
                self.ensure_space(line_height)?;
                if self.remaining() + EPSILON < line_height {
                    return Err(LayoutError::BlockTooTall {
                        height: line_height,
                        usable: self.geometry.usable_height(),
                    });
                }
                continue;
            }
            let rest = lines.split_off(fitting.min(lines.len()));
            let height = lines.len() as f32 * line_height;
            self.place(BlockContent::Paragraph { lines, style }, height)?;
            lines = rest;
        }
        Ok(())
    }

    /// Places vertical whitespace of one line height.
    pub fn spacer(&mut self, font: &Font) -> Result<(), LayoutError> {
        let height = self.measurer.line_height(font);
        self.ensure_space(height)?;
        self.place(BlockContent::Spacer, height)
    }

    /// Places a horizontal rule across the content width.
    pub fn rule(&mut self) -> Result<(), LayoutError> {
        self.ensure_space(0.0)?;
        let content = BlockContent::Rule {
            x_start: self.geometry.content_left(),
            x_end: self.geometry.content_right(),
        };
        self.place(content, 0.0)
    }

    /// Second pass: numbers every page now that the total is known.
    pub fn finish(mut self, id: ReportId, metadata: DocumentMetadata) -> DocumentArtifact {
        if self.pages.len() > 1 && self.current_page().is_empty() {
            self.pages.pop();
        }
        let total = self.pages.len();
        for page in &mut self.pages {
            page.footer = Some(format!("Page {} of {}", page.number, total));
        }
        DocumentArtifact::new(id, metadata, self.geometry, self.pages)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
