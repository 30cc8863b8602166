//! Windowed and latest-file path selection

use crate::domain::pattern::infer_batch;
use crate::domain::window::{resolve_window, DateWindowSpec};
use crate::error::{Result, VerdateError};
use chrono::NaiveDate;
use log::debug;

/// Selects paths from a candidate set by the date they carry.
///
/// The engine holds only the dataset root it resolves for, so failures can
/// report the attempted path; all selection state is method-local.
#[derive(Debug, Clone)]
pub struct VersionedPathEngine {
    root: String,
}

impl VersionedPathEngine {
    pub fn new(root: impl Into<String>) -> Self {
        VersionedPathEngine { root: root.into() }
    }

    /// Keep the candidates whose extracted date falls inside the resolved
    /// window, bounds inclusive.
    pub fn select_in_window(
        &self,
        candidates: &[String],
        spec: &DateWindowSpec,
    ) -> Result<Vec<String>> {
        if candidates.is_empty() {
            return Err(self.no_files(None));
        }
        let pattern = infer_batch(candidates)?;
        let window = resolve_window(spec)?;

        let mut kept = Vec::new();
        for path in candidates {
            if window.contains(pattern.extract_date(path)?) {
                kept.push(path.clone());
            }
        }
        if kept.is_empty() {
            return Err(VerdateError::NoFilesInRange {
                path: self.root.clone(),
                first_day: window.first_day,
                last_day: window.last_day,
            });
        }
        debug!(
            "kept {} of {} candidate files under {}",
            kept.len(),
            candidates.len(),
            self.root
        );
        Ok(kept)
    }

    /// The candidate with the maximum extracted date, restricted to dates on
    /// or before `as_of` when a bound is given. Candidates sharing the
    /// maximum date resolve to the last one in listing order.
    pub fn select_latest(
        &self,
        candidates: &[String],
        as_of: Option<NaiveDate>,
    ) -> Result<String> {
        if candidates.is_empty() {
            return Err(self.no_files(None));
        }
        let pattern = infer_batch(candidates)?;

        let mut dated = Vec::with_capacity(candidates.len());
        for path in candidates {
            dated.push((pattern.extract_date(path)?, path));
        }
        if let Some(bound) = as_of {
            dated.retain(|(day, _)| *day <= bound);
        }
        dated
            .into_iter()
            .max_by_key(|(day, _)| *day)
            .map(|(_, path)| path.clone())
            .ok_or_else(|| self.no_files(as_of))
    }

    fn no_files(&self, as_of: Option<NaiveDate>) -> VerdateError {
        VerdateError::NoFilesFound {
            path: self.root.clone(),
            as_of,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::window::TimeScale;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn daily_paths(start: NaiveDate, count: usize) -> Vec<String> {
        (0..count)
            .map(|offset| {
                let day = start + chrono::Duration::days(offset as i64);
                format!("data/test_{}.parquet", day.format("%Y-%m-%d"))
            })
            .collect()
    }

    fn engine() -> VersionedPathEngine {
        VersionedPathEngine::new("data/")
    }

    #[test]
    fn test_select_in_window_keeps_inclusive_bounds() {
        let paths = daily_paths(date(2023, 4, 1), 30);
        let spec = DateWindowSpec {
            scale: TimeScale::Days,
            length: 7,
            align_to: None,
            as_of: Some(date(2023, 4, 20)),
        };
        let kept = engine().select_in_window(&paths, &spec).unwrap();
        assert_eq!(kept.len(), 8);
        assert_eq!(kept.first().unwrap(), "data/test_2023-04-13.parquet");
        assert_eq!(kept.last().unwrap(), "data/test_2023-04-20.parquet");
    }

    #[test]
    fn test_select_in_window_empty_candidates() {
        let spec = DateWindowSpec {
            scale: TimeScale::Days,
            length: 7,
            align_to: None,
            as_of: Some(date(2023, 4, 20)),
        };
        let err = engine().select_in_window(&[], &spec).unwrap_err();
        assert!(matches!(err, VerdateError::NoFilesFound { .. }));
    }

    #[test]
    fn test_select_in_window_nothing_in_range() {
        let paths = daily_paths(date(2023, 4, 1), 5);
        let spec = DateWindowSpec {
            scale: TimeScale::Days,
            length: 3,
            align_to: None,
            as_of: Some(date(2024, 1, 15)),
        };
        let err = engine().select_in_window(&paths, &spec).unwrap_err();
        match err {
            VerdateError::NoFilesInRange {
                first_day,
                last_day,
                ..
            } => {
                assert_eq!(first_day, date(2024, 1, 15));
                assert_eq!(last_day, date(2024, 1, 12));
            }
            other => panic!("expected NoFilesInRange, got {other:?}"),
        }
    }

    #[test]
    fn test_select_in_window_rejects_mixed_conventions() {
        let paths = vec![
            "data/a_2023-04-01.parquet".to_string(),
            "data/b_20230402.parquet".to_string(),
        ];
        let spec = DateWindowSpec {
            scale: TimeScale::Days,
            length: 7,
            align_to: None,
            as_of: Some(date(2023, 4, 2)),
        };
        let err = engine().select_in_window(&paths, &spec).unwrap_err();
        assert!(matches!(err, VerdateError::AmbiguousPatternSet(_)));
    }

    #[test]
    fn test_select_latest_without_bound_returns_global_maximum() {
        let paths = daily_paths(date(2023, 4, 1), 30);
        let latest = engine().select_latest(&paths, None).unwrap();
        assert_eq!(latest, "data/test_2023-04-30.parquet");
    }

    #[test]
    fn test_select_latest_with_bound_inside_the_set() {
        let paths = daily_paths(date(2023, 4, 1), 30);
        let latest = engine()
            .select_latest(&paths, Some(date(2023, 4, 17)))
            .unwrap();
        assert_eq!(latest, "data/test_2023-04-17.parquet");
    }

    #[test]
    fn test_select_latest_with_bound_between_candidates() {
        let paths = vec![
            "data/test_2023-04-01.parquet".to_string(),
            "data/test_2023-04-10.parquet".to_string(),
            "data/test_2023-04-20.parquet".to_string(),
        ];
        let latest = engine()
            .select_latest(&paths, Some(date(2023, 4, 15)))
            .unwrap();
        assert_eq!(latest, "data/test_2023-04-10.parquet");
    }

    #[test]
    fn test_select_latest_bound_before_all_candidates() {
        let paths = daily_paths(date(2023, 4, 1), 5);
        let err = engine()
            .select_latest(&paths, Some(date(2023, 3, 1)))
            .unwrap_err();
        match err {
            VerdateError::NoFilesFound { as_of, .. } => {
                assert_eq!(as_of, Some(date(2023, 3, 1)));
            }
            other => panic!("expected NoFilesFound, got {other:?}"),
        }
    }
}
