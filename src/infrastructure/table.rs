//! Table loading and saving dispatched by file extension

use crate::error::{Result, VerdateError};
use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Supported on-disk table formats, keyed by file extension. The mapping is
/// closed: an unrecognized extension is an error, never a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Parquet,
    Csv,
    Json,
    Ipc,
}

impl FileFormat {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 5] =
        ["parquet", "csv", "json", "ipc", "feather"];

    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or("");
        match extension {
            "parquet" => Ok(FileFormat::Parquet),
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            "ipc" | "feather" => Ok(FileFormat::Ipc),
            _ => Err(VerdateError::UnsupportedFormat {
                path: path.to_string(),
                extension: extension.to_string(),
            }),
        }
    }
}

/// Options applied to every loaded table: optional column projection and an
/// optional cast map over a closed set of dtype names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub columns: Option<Vec<String>>,
    pub dtypes: Option<BTreeMap<String, String>>,
}

/// Loads and saves dataframes by path.
pub trait TableStore: Sync {
    fn load(&self, path: &str, options: &LoadOptions) -> Result<DataFrame>;
    fn save(&self, table: &mut DataFrame, path: &str) -> Result<()>;
}

/// Local-disk store backed by the polars readers and writers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTableStore;

impl TableStore for LocalTableStore {
    fn load(&self, path: &str, options: &LoadOptions) -> Result<DataFrame> {
        let format = FileFormat::from_path(path)?;
        let file = File::open(path)?;
        let table = match format {
            FileFormat::Parquet => ParquetReader::new(file).finish()?,
            FileFormat::Csv => CsvReader::new(file).finish()?,
            FileFormat::Json => JsonReader::new(file)
                .with_json_format(JsonFormat::Json)
                .finish()?,
            FileFormat::Ipc => IpcReader::new(file).finish()?,
        };
        debug!("loaded {path}");
        apply_load_options(table, options)
    }

    fn save(&self, table: &mut DataFrame, path: &str) -> Result<()> {
        let format = FileFormat::from_path(path)?;
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        match format {
            FileFormat::Parquet => {
                ParquetWriter::new(file).finish(table)?;
            }
            FileFormat::Csv => {
                CsvWriter::new(file).finish(table)?;
            }
            FileFormat::Json => {
                JsonWriter::new(file)
                    .with_json_format(JsonFormat::Json)
                    .finish(table)?;
            }
            FileFormat::Ipc => {
                IpcWriter::new(file).finish(table)?;
            }
        }
        debug!("saved {path}");
        Ok(())
    }
}

fn apply_load_options(mut table: DataFrame, options: &LoadOptions) -> Result<DataFrame> {
    if let Some(columns) = &options.columns {
        table = table.select(columns.iter().map(String::as_str))?;
    }
    if let Some(dtypes) = &options.dtypes {
        for (name, type_name) in dtypes {
            let cast = table.column(name)?.cast(&dtype_from_name(type_name)?)?;
            table.with_column(cast)?;
        }
    }
    Ok(table)
}

fn dtype_from_name(name: &str) -> Result<DataType> {
    match name {
        "bool" => Ok(DataType::Boolean),
        "int32" => Ok(DataType::Int32),
        "int64" => Ok(DataType::Int64),
        "float32" => Ok(DataType::Float32),
        "float64" => Ok(DataType::Float64),
        "str" | "string" => Ok(DataType::String),
        _ => Err(VerdateError::Config(format!(
            "unsupported dtype {name:?}; supported dtypes: bool, int32, int64, float32, float64, string"
        ))),
    }
}
