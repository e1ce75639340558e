//! Report module - compiling a proposal and its feedback into deliverables.
//!
//! # Module Organization
//!
//! - `artifact` - the paginated document model (pages, placed blocks, footers)
//! - `style` - fonts, colours and the report's style sheet
//! - `layout` - compilation-scoped page and cursor state
//! - `budget_table` - row planning and pagination for the budget table
//! - `compiler` - fixed section order of the document
//! - `summary` - HTML summary for the email body
//! - `email` - feedback email composition

mod artifact;
mod budget_table;
mod compiler;
mod email;
mod errors;
mod format;
mod html;
mod layout;
mod style;
mod summary;

pub use artifact::{
    BlockContent, DocumentArtifact, DocumentMetadata, Page, PageGeometry, PlacedBlock, RowRole,
    TableCell,
};
pub use budget_table::{
    BudgetTableLayout, PageBreak, PlannedRow, TableColumns, TablePlan, NO_BUDGET_ITEMS,
};
pub use compiler::{
    CompileOptions, DocumentCompiler, DOCUMENT_TITLE, FEEDBACK_INTRO, FEEDBACK_TITLE, NO_FEEDBACK,
    NO_STAKEHOLDERS,
};
pub use email::{EmailAttachment, EmailSender, ProposalEmail};
pub use errors::LayoutError;
pub use format::ExportFormat;
pub use html::escape_html;
pub use layout::LayoutContext;
pub use style::{sheet, Align, Color, Font, FontWeight, TextStyle};
pub use summary::{SummaryCompiler, SummaryFragment, CLOSING_NOTE, EMPTY_FEEDBACK_NOTE};
