#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use polars::df;
use polars::prelude::DataFrame;
use std::path::Path;
use verdate::infrastructure::table::{LocalTableStore, TableStore};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// One-row frame for a single dated file.
pub fn daily_frame(date: NaiveDate, value: i64) -> DataFrame {
    df!(
        "day" => [date.format("%Y-%m-%d").to_string()],
        "value" => [value],
    )
    .unwrap()
}

/// Write one parquet file per day under `root`, named `test_YYYY-MM-DD.parquet`.
pub fn write_daily_files(root: &Path, start: NaiveDate, count: usize) {
    let store = LocalTableStore;
    for offset in 0..count {
        let date = start + Duration::days(offset as i64);
        let path = root.join(format!("test_{}.parquet", date.format("%Y-%m-%d")));
        store
            .save(&mut daily_frame(date, offset as i64), path.to_str().unwrap())
            .unwrap();
    }
}

/// Minimum and maximum of the `day` column of a loaded frame.
pub fn day_bounds(frame: &DataFrame) -> (String, String) {
    let days: Vec<String> = frame
        .column("day")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .map(String::from)
        .collect();
    (
        days.iter().min().unwrap().clone(),
        days.iter().max().unwrap().clone(),
    )
}
