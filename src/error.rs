//! Error types for verdate

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the verdate library
#[derive(Debug, Error)]
pub enum VerdateError {
    #[error("no date pattern found in {0}")]
    PatternNotFound(String),

    #[error("files in the candidate set mix date conventions: {}", .0.join(", "))]
    AmbiguousPatternSet(Vec<String>),

    #[error("{}", no_files_message(.path, .as_of))]
    NoFilesFound {
        path: String,
        as_of: Option<NaiveDate>,
    },

    #[error("no files in {path} dated between {last_day} and {first_day}")]
    NoFilesInRange {
        path: String,
        first_day: NaiveDate,
        last_day: NaiveDate,
    },

    #[error("placeholder {{{0}}} is not allowed; only {{date_path}} and {{date_file}} are supported")]
    UnsupportedPlaceholder(String),

    #[error("placeholder {{{0}}} appears in the path template but has no date format configured")]
    MissingFormatSpec(String),

    #[error(
        "unsupported file extension {extension:?} for {path}; supported extensions: {}",
        crate::infrastructure::table::FileFormat::SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedFormat { path: String, extension: String },

    #[error("invalid window: {0}")]
    InvalidWindow(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("table backend error: {0}")]
    Table(#[from] polars::error::PolarsError),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

fn no_files_message(path: &str, as_of: &Option<NaiveDate>) -> String {
    match as_of {
        Some(day) => format!("no files found in {path} dated on or before {day}"),
        None => format!("no files found in {path}, please check if the path is correct"),
    }
}

/// Result type using VerdateError
pub type Result<T> = std::result::Result<T, VerdateError>;
