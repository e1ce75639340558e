//! Currency formatting for budget amounts.
//!
//! Every amount in a report is shown with exactly two decimal places, no
//! thousands separators, and a single currency symbol prefix.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Default currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Rounds an amount to the cent the way it is displayed.
///
/// Totals are summed from rounded amounts so that the printed rows always add
/// up to the printed total.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount to exactly two decimal places (`12.5` -> `"12.50"`).
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_amount(amount);
    rounded.rescale(2);
    if rounded.is_zero() {
        // -0.00 after rounding a tiny negative value
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Currency presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    symbol: String,
}

impl CurrencyFormat {
    /// Creates a format with the given prefix symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Returns the prefix symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Formats an amount with the currency prefix (`$12.50`).
    pub fn format(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol, format_amount(amount))
    }

    /// Parses a value produced by [`CurrencyFormat::format`] back into a decimal.
    pub fn parse(&self, formatted: &str) -> Option<Decimal> {
        formatted
            .trim()
            .strip_prefix(self.symbol.as_str())
            .and_then(|digits| digits.parse().ok())
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_SYMBOL)
    }
}
