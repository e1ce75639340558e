//! Layout failures.
//!
//! A correct compilation of validated input never produces these; they exist
//! so a broken invariant stops the compilation instead of yielding a corrupt
//! artifact.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A block that may not be split is taller than a whole page.
    #[error("Block of height {height:.1}pt cannot fit the usable page height of {usable:.1}pt")]
    BlockTooTall { height: f32, usable: f32 },

    /// A measured height was negative or not a number.
    #[error("Invalid computed height: {0}")]
    InvalidHeight(f32),

    /// A block would have been drawn past the bottom margin.
    #[error("Block at y={y:.1}pt with height {height:.1}pt overflows page {page} (bottom {bottom:.1}pt)")]
    Overflow {
        page: usize,
        y: f32,
        height: f32,
        bottom: f32,
    },

    /// The cursor was asked to move backwards.
    #[error("Cursor cannot move back from {from:.1}pt to {to:.1}pt")]
    CursorRegression { from: f32, to: f32 },

    /// Geometry leaves no room for content.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// Input violated a data invariant the layout depends on.
    #[error("Invalid proposal data: {0}")]
    InvalidInput(#[from] ValidationError),
}

impl LayoutError {
    /// Creates an invalid geometry error.
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry(reason.into())
    }

    /// Rejects heights a block could never legitimately have.
    pub fn check_height(height: f32) -> Result<f32, LayoutError> {
        if height.is_finite() && height >= 0.0 {
            Ok(height)
        } else {
            Err(LayoutError::InvalidHeight(height))
        }
    }
}
