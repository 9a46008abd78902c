//! Error types for dd-output.

use dd_core::{PackageId, WarehouseId};
use thiserror::Error;

/// Errors that can occur when building or writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("assignment references unknown warehouse {0}")]
    UnknownWarehouse(WarehouseId),

    #[error("assignment references unknown package {0}")]
    UnknownPackage(PackageId),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
