//! Path template formatting with date placeholders
//!
//! Versioned datasets address a single file through a template such as
//! `root/{date_path}/file_{date_file}.parquet`; both placeholders resolve to
//! the same aligned calendar date, each with its own format.

use crate::domain::window::most_recent_aligned;
use crate::error::{Result, VerdateError};
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveTime, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DATE_PATH: &str = "date_path";
pub const DATE_FILE: &str = "date_file";

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{([^{}]*)\}").unwrap())
}

/// Date formats for the `{date_path}` and `{date_file}` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderFormats {
    pub date_path: Option<String>,
    pub date_file: Option<String>,
}

impl PlaceholderFormats {
    fn format_for(&self, name: &str) -> Result<&str> {
        let format = match name {
            DATE_PATH => self.date_path.as_deref(),
            DATE_FILE => self.date_file.as_deref(),
            other => return Err(VerdateError::UnsupportedPlaceholder(other.to_string())),
        };
        format.ok_or_else(|| VerdateError::MissingFormatSpec(name.to_string()))
    }
}

/// Substitute the date placeholders in `template` with the most recent
/// aligned date. Placeholders other than `{date_path}` and `{date_file}` are
/// rejected, as is a placeholder without a configured format.
pub fn format_path(
    template: &str,
    formats: &PlaceholderFormats,
    align_to: Option<Weekday>,
    as_of: Option<NaiveDate>,
) -> Result<String> {
    let day = most_recent_aligned(as_of, align_to);
    let mut resolved = template.to_string();
    for captures in placeholder_regex().captures_iter(template) {
        let name = &captures[1];
        let rendered = render(day, formats.format_for(name)?, name)?;
        resolved = resolved.replace(&format!("{{{name}}}"), &rendered);
    }
    Ok(resolved)
}

fn render(day: NaiveDate, format: &str, name: &str) -> Result<String> {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(VerdateError::Config(format!(
            "invalid date format {format:?} for placeholder {{{name}}}"
        )));
    }
    // Render through a midnight timestamp so time directives in a format are
    // well-defined rather than a rendering error.
    let midnight = day.and_time(NaiveTime::default());
    Ok(midnight.format_with_items(items.into_iter()).to_string())
}
