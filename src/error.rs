//! Error types for the dashboard core.

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors that can occur while loading or exporting ledger data.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Failed to open or read a local row dump
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote source request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Row payload could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing source argument
    #[error("Missing source argument. Usage: cashflow-dashboard <rows.json|url> [key=value ...] [--all]")]
    MissingArgument,

    /// Unrecognized CLI argument
    #[error("Unknown argument '{0}'")]
    UnknownArgument(String),

    /// CLI argument with an unparseable value
    #[error("Invalid value for '{key}': {value}")]
    InvalidArgument { key: String, value: String },
}
