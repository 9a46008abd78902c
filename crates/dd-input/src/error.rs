use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("`{section}` must be {expected}")]
    InvalidSection {
        section:  &'static str,
        expected: &'static str,
    },

    #[error("missing required field `{field}` in {section} record {record}")]
    MissingField {
        section: &'static str,
        record:  String,
        field:   String,
    },

    #[error("invalid {section} record {record}: {message}")]
    InvalidRecord {
        section: &'static str,
        record:  String,
        message: String,
    },
}

pub type InputResult<T> = Result<T, InputError>;
