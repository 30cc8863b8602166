//! Dataset read/write use cases
//!
//! Free functions tying the path engine to the lister and store
//! collaborators, one per resolution mode. All of them propagate the first
//! failure; none retries or returns partial results.

use crate::application::select::VersionedPathEngine;
use crate::error::{Result, VerdateError};
use crate::infrastructure::config::{LatestConfig, VersionedConfig, WindowedConfig};
use crate::infrastructure::fs::PathLister;
use crate::infrastructure::table::{LoadOptions, TableStore};
use log::info;
use polars::prelude::DataFrame;
use rayon::prelude::*;

/// Load every file inside the configured trailing window and concatenate
/// them. With a configured `thread_count` the per-file loads fan out on a
/// bounded worker pool; the concatenation waits for all of them.
pub fn read_window<L, S>(lister: &L, store: &S, config: &WindowedConfig) -> Result<DataFrame>
where
    L: PathLister,
    S: TableStore,
{
    let engine = VersionedPathEngine::new(&config.base.path);
    let candidates = list_candidates(lister, &config.base.path)?;
    let kept = engine.select_in_window(&candidates, &config.window_spec()?)?;
    let tables = load_all(store, &kept, &config.base.load, config.thread_count)?;
    let table = concat_tables(tables)?;
    info!(
        "loaded {} rows from {} files under {}",
        table.height(),
        kept.len(),
        config.base.path
    );
    Ok(table)
}

/// Load the single most recent file, honoring the configured back-date.
pub fn read_latest<L, S>(lister: &L, store: &S, config: &LatestConfig) -> Result<DataFrame>
where
    L: PathLister,
    S: TableStore,
{
    let engine = VersionedPathEngine::new(&config.base.path);
    let candidates = list_candidates(lister, &config.base.path)?;
    let latest = engine.select_latest(&candidates, config.base.back_date)?;
    let table = store.load(&latest, &config.base.load)?;
    info!("loaded latest file {latest}");
    Ok(table)
}

/// Load the file addressed by the resolved path template.
pub fn read_versioned<S>(store: &S, config: &VersionedConfig) -> Result<DataFrame>
where
    S: TableStore,
{
    let path = config.resolved_path()?;
    store.load(&path, &config.base.load)
}

/// Save a table to the file addressed by the resolved path template.
pub fn write_versioned<S>(store: &S, table: &mut DataFrame, config: &VersionedConfig) -> Result<()>
where
    S: TableStore,
{
    let path = config.resolved_path()?;
    store.save(table, &path)
}

/// Load one concrete file.
pub fn read_file<S>(store: &S, path: &str, options: &LoadOptions) -> Result<DataFrame>
where
    S: TableStore,
{
    store.load(path, options)
}

/// Save a table to one concrete file.
pub fn write_file<S>(store: &S, table: &mut DataFrame, path: &str) -> Result<()>
where
    S: TableStore,
{
    store.save(table, path)
}

fn list_candidates<L: PathLister>(lister: &L, root: &str) -> Result<Vec<String>> {
    let candidates = lister.list(root)?;
    if candidates.is_empty() {
        return Err(VerdateError::NoFilesFound {
            path: root.to_string(),
            as_of: None,
        });
    }
    Ok(candidates)
}

fn load_all<S: TableStore>(
    store: &S,
    paths: &[String],
    options: &LoadOptions,
    thread_count: Option<usize>,
) -> Result<Vec<DataFrame>> {
    match thread_count {
        None => paths.iter().map(|path| store.load(path, options)).collect(),
        Some(0) => Err(VerdateError::Config(
            "thread_count must be at least 1".to_string(),
        )),
        Some(workers) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|err| {
                    VerdateError::Config(format!("cannot build worker pool: {err}"))
                })?;
            pool.install(|| {
                paths
                    .par_iter()
                    .map(|path| store.load(path, options))
                    .collect()
            })
        }
    }
}

fn concat_tables(tables: Vec<DataFrame>) -> Result<DataFrame> {
    let mut tables = tables.into_iter();
    let Some(mut combined) = tables.next() else {
        // Selection guarantees a non-empty set; guard anyway.
        return Err(VerdateError::Config(
            "cannot concatenate an empty table set".to_string(),
        ));
    };
    for table in tables {
        combined.vstack_mut(&table)?;
    }
    Ok(combined)
}
