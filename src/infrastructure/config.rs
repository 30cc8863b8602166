//! Dataset configuration
//!
//! Each resolution mode has its own explicit config struct; the settings
//! every mode shares live in the flattened [`PathResolutionConfig`]. Weekday
//! alignment is configured with the legacy integer indices (Monday = 0) and
//! converted to `chrono::Weekday` up front, so the rest of the crate never
//! sees a raw index.

use crate::domain::template::PlaceholderFormats;
use crate::domain::window::{DateWindowSpec, TimeScale};
use crate::error::{Result, VerdateError};
use crate::infrastructure::table::LoadOptions;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings shared by every dataset mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResolutionConfig {
    /// Dataset root, or the path template for versioned datasets.
    pub path: String,
    /// Override for "today", used to reproduce historical runs.
    #[serde(default)]
    pub back_date: Option<NaiveDate>,
    #[serde(default)]
    pub load: LoadOptions,
}

/// Windowed multi-file read: every file whose date falls inside the trailing
/// window is loaded and concatenated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowedConfig {
    #[serde(flatten)]
    pub base: PathResolutionConfig,
    pub time_scale: TimeScale,
    pub history_length: u32,
    #[serde(default)]
    pub starting_weekday: Option<u8>,
    /// Bounded worker pool size for per-file loads; absent means sequential.
    #[serde(default)]
    pub thread_count: Option<usize>,
}

impl WindowedConfig {
    pub fn window_spec(&self) -> Result<DateWindowSpec> {
        Ok(DateWindowSpec {
            scale: self.time_scale,
            length: self.history_length,
            align_to: alignment(self.starting_weekday)?,
            as_of: self.base.back_date,
        })
    }
}

/// Latest-file read: the single candidate with the most recent date not
/// exceeding the back-date bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestConfig {
    #[serde(flatten)]
    pub base: PathResolutionConfig,
}

/// Templated single-path read/write through `{date_path}`/`{date_file}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedConfig {
    #[serde(flatten)]
    pub base: PathResolutionConfig,
    #[serde(flatten)]
    pub formats: PlaceholderFormats,
    #[serde(default)]
    pub starting_weekday: Option<u8>,
}

impl VersionedConfig {
    /// The concrete path for this run, with both placeholders resolved to
    /// the aligned reference date.
    pub fn resolved_path(&self) -> Result<String> {
        crate::domain::template::format_path(
            &self.base.path,
            &self.formats,
            alignment(self.starting_weekday)?,
            self.base.back_date,
        )
    }
}

/// A dataset catalog entry, tagged by resolution mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DatasetConfig {
    Windowed(WindowedConfig),
    Latest(LatestConfig),
    Versioned(VersionedConfig),
}

impl DatasetConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}

fn alignment(starting_weekday: Option<u8>) -> Result<Option<Weekday>> {
    starting_weekday.map(weekday_from_index).transpose()
}

/// Convert a legacy weekday index (Monday = 0 .. Sunday = 6) to a weekday.
pub fn weekday_from_index(index: u8) -> Result<Weekday> {
    Weekday::try_from(index).map_err(|_| {
        VerdateError::Config(format!(
            "starting_weekday must be between 0 (Monday) and 6 (Sunday), got {index}"
        ))
    })
}
