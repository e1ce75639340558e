//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, currency formatting and error types that form the
//! vocabulary of the report compilation domain.

mod errors;
mod ids;
mod money;

pub use errors::ValidationError;
pub use ids::ReportId;
pub use money::{format_amount, round_amount, CurrencyFormat, DEFAULT_CURRENCY_SYMBOL};
