//! Integration tests for templated versioned reads and writes

mod common;
use common::{day, daily_frame, init_logging};

use tempfile::TempDir;
use verdate::application::{read_versioned, write_versioned};
use verdate::domain::template::PlaceholderFormats;
use verdate::infrastructure::config::{PathResolutionConfig, VersionedConfig};
use verdate::infrastructure::table::{LoadOptions, LocalTableStore};
use verdate::VerdateError;

fn versioned_config(template: String) -> VersionedConfig {
    VersionedConfig {
        base: PathResolutionConfig {
            path: template,
            back_date: None,
            load: LoadOptions::default(),
        },
        formats: PlaceholderFormats {
            date_path: Some("%Y-%m-%d".to_string()),
            date_file: Some("%Y-%m-%d".to_string()),
        },
        starting_weekday: None,
    }
}

#[test]
fn test_versioned_write_then_read_round_trip() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let template = format!(
        "{}/{{date_path}}/test_{{date_file}}.parquet",
        temp.path().to_str().unwrap()
    );

    let mut config = versioned_config(template);
    config.base.back_date = Some(day(2023, 4, 5));

    let mut frame = daily_frame(day(2023, 4, 5), 42);
    write_versioned(&LocalTableStore, &mut frame, &config).unwrap();
    assert!(temp
        .path()
        .join("2023-04-05/test_2023-04-05.parquet")
        .exists());

    let loaded = read_versioned(&LocalTableStore, &config).unwrap();
    assert!(loaded.equals(&frame));
}

#[test]
fn test_versioned_path_snaps_to_the_starting_weekday() {
    let temp = TempDir::new().unwrap();
    let template = format!(
        "{}/{{date_path}}/test_{{date_file}}.parquet",
        temp.path().to_str().unwrap()
    );

    // 2023-04-03 is a Monday; aligned to Saturday (legacy index 5) the
    // resolved date is 2023-04-01.
    let mut config = versioned_config(template);
    config.base.back_date = Some(day(2023, 4, 3));
    config.starting_weekday = Some(5);

    let mut frame = daily_frame(day(2023, 4, 1), 7);
    write_versioned(&LocalTableStore, &mut frame, &config).unwrap();
    assert!(temp
        .path()
        .join("2023-04-01/test_2023-04-01.parquet")
        .exists());

    let loaded = read_versioned(&LocalTableStore, &config).unwrap();
    assert!(loaded.equals(&frame));
}

#[test]
fn test_versioned_template_rejects_unknown_placeholders() {
    let config = versioned_config("root/{not_date_path}/test_{date_file}.parquet".to_string());
    let err = read_versioned(&LocalTableStore, &config).unwrap_err();
    match err {
        VerdateError::UnsupportedPlaceholder(name) => assert_eq!(name, "not_date_path"),
        other => panic!("expected UnsupportedPlaceholder, got {other:?}"),
    }
}

#[test]
fn test_versioned_template_requires_a_format_for_each_placeholder() {
    let mut config = versioned_config("root/{date_path}/test_{date_file}.parquet".to_string());
    config.formats.date_file = None;
    let err = read_versioned(&LocalTableStore, &config).unwrap_err();
    assert!(matches!(err, VerdateError::MissingFormatSpec(_)));
}
