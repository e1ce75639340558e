//! Domain layer containing the report compilation logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, currency, errors)
//! - `proposal` - The structured proposal submission
//! - `feedback` - Line classification and section extraction for feedback text
//! - `report` - Document layout, summary and email composition

pub mod feedback;
pub mod foundation;
pub mod proposal;
pub mod report;
