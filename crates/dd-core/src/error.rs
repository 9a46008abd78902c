//! Error type for the core primitives.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised while constructing core values from untrusted numbers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },

    #[error("invalid delay range [{min}, {max}]: bounds must be finite, non-negative and min <= max")]
    InvalidDelayRange { min: f64, max: f64 },
}

/// Shorthand result type for `dd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
