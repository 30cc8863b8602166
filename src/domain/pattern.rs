//! Date-encoding pattern inference for file paths
//!
//! Finds which of a closed family of date conventions is present in a path,
//! so files can be filtered by the date they carry in their name.

use crate::error::{Result, VerdateError};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Separators recognized between date components, in precedence order.
const SEPARATORS: [&str; 4] = ["/", "-", "_", ""];

/// Digit-width template of a date encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateResolution {
    /// Four-digit year, two-digit month, two-digit day.
    Day,
    /// Four-digit year, two-digit month; extracted dates land on day 1.
    Month,
}

/// A date-encoding convention: the regex that recognizes it in a path and
/// the strftime-style format of the matched substring.
#[derive(Debug, Clone)]
pub struct DatePattern {
    regex: Regex,
    date_format: String,
    resolution: DateResolution,
}

impl PartialEq for DatePattern {
    fn eq(&self, other: &Self) -> bool {
        self.regex.as_str() == other.regex.as_str() && self.date_format == other.date_format
    }
}

impl Eq for DatePattern {}

impl DatePattern {
    /// The regex source text, e.g. `\d{4}-\d{2}-\d{2}`.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The strftime format of a matched substring, e.g. `%Y-%m-%d`.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn resolution(&self) -> DateResolution {
        self.resolution
    }

    /// Rightmost occurrence of this pattern in `path`, if any. Paths may
    /// contain ID-like digit runs before the real date, so the last match wins.
    fn last_match<'p>(&self, path: &'p str) -> Option<&'p str> {
        self.regex.find_iter(path).last().map(|found| found.as_str())
    }

    /// Extract the calendar date encoded in `path` under this pattern.
    /// Month-resolution patterns yield the first day of the encoded month.
    pub fn extract_date(&self, path: &str) -> Result<NaiveDate> {
        self.last_match(path)
            .and_then(|matched| parse_components(matched, self.resolution))
            .ok_or_else(|| VerdateError::PatternNotFound(path.to_string()))
    }
}

fn parse_components(matched: &str, resolution: DateResolution) -> Option<NaiveDate> {
    let digits: String = matched.chars().filter(char::is_ascii_digit).collect();
    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let month: u32 = digits.get(4..6)?.parse().ok()?;
    let day: u32 = match resolution {
        DateResolution::Day => digits.get(6..8)?.parse().ok()?,
        DateResolution::Month => 1,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The closed, ordered candidate set: full-date templates across all
/// separators first, then year-month templates, so a more specific encoding
/// always beats a less specific one.
fn candidate_patterns() -> &'static [DatePattern] {
    static PATTERNS: OnceLock<Vec<DatePattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let mut patterns = Vec::with_capacity(SEPARATORS.len() * 2);
        for resolution in [DateResolution::Day, DateResolution::Month] {
            for sep in SEPARATORS {
                let (pattern, date_format) = match resolution {
                    DateResolution::Day => (
                        format!(r"\d{{4}}{sep}\d{{2}}{sep}\d{{2}}"),
                        format!("%Y{sep}%m{sep}%d"),
                    ),
                    DateResolution::Month => {
                        (format!(r"\d{{4}}{sep}\d{{2}}"), format!("%Y{sep}%m"))
                    }
                };
                patterns.push(DatePattern {
                    regex: Regex::new(&pattern).unwrap(),
                    date_format,
                    resolution,
                });
            }
        }
        patterns
    })
}

/// Infer the date convention present in `path`, returning the matched
/// substring and the winning pattern.
pub fn infer(path: &str) -> Result<(String, DatePattern)> {
    for pattern in candidate_patterns() {
        if let Some(matched) = pattern.last_match(path) {
            return Ok((matched.to_string(), pattern.clone()));
        }
    }
    Err(VerdateError::PatternNotFound(path.to_string()))
}

/// Infer the single date convention shared by every path of a dataset.
///
/// All files under one logical dataset must use one encoding; mixing
/// conventions is never resolved by majority vote because silently picking
/// one risks dropping valid files.
pub fn infer_batch(paths: &[String]) -> Result<DatePattern> {
    let mut seen: Vec<DatePattern> = Vec::new();
    for path in paths {
        let (_, pattern) = infer(path)?;
        if !seen.contains(&pattern) {
            seen.push(pattern);
        }
    }
    if seen.len() > 1 {
        return Err(VerdateError::AmbiguousPatternSet(
            seen.iter()
                .map(|pattern| format!("{} ({})", pattern.pattern(), pattern.date_format()))
                .collect(),
        ));
    }
    seen.pop().ok_or_else(|| {
        VerdateError::Config("cannot infer a date pattern from an empty candidate set".to_string())
    })
}
