// src/error.rs
use thiserror::Error;

/// Rejected operator input. Recovered by prompting again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid literal for an integer: '{0}'")]
    NotAnInteger(String),

    #[error("Exactly {expected} values required, you provided {provided}")]
    WrongCount { expected: usize, provided: usize },
}

/// Failures talking to the spreadsheet service. Never recovered.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to spreadsheet service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("spreadsheet service returned {status} for {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("no spreadsheet named '{0}' is visible to these credentials")]
    SpreadsheetNotFound(String),

    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("worksheet '{0}' does not exist")]
    UnknownWorksheet(String),
}

/// Sheet contents that do not have the shape the calculations need.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("worksheet '{0}' has no data rows")]
    EmptySheet(String),

    #[error("row in worksheet '{sheet}' has {found} values, expected {expected}")]
    DataShape {
        sheet: String,
        expected: usize,
        found: usize,
    },

    #[error("cell '{value}' in worksheet '{sheet}' is not an integer")]
    NotAnInteger { sheet: String, value: String },

    #[error("column {column} of worksheet '{sheet}' has no sales history")]
    InsufficientHistory { sheet: String, column: usize },

    #[error("forecast for column {0} does not fit in an integer")]
    Overflow(usize),

    #[error("surplus for column {0} does not fit in an integer")]
    SurplusOverflow(usize),
}
