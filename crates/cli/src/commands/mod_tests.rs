use super::*;
use std::fs::write;

use chrono::TimeDelta;
use pathsift_fs::{AugmentedFileInfo, find_files};

use crate::printer::{JsonPrinter, PrinterConfig};

fn info(name: &str, age_days: i64, now: DateTime<Utc>) -> AugmentedFileInfo {
    AugmentedFileInfo::new(name, 1, 0o644, now - TimeDelta::days(age_days), false)
}

#[test]
fn flags_override_config_fields() {
    let base = CriteriaConfig {
        name_patterns: vec!["*.txt".into()],
        older_than: Some(Utc::now()),
        mode: Some("600".into()),
        ..CriteriaConfig::default()
    };

    let args = SelectionArgs {
        patterns: vec!["*.log".into()],
        older_than_days: Some(3),
        any: true,
        ..SelectionArgs::default()
    };
    let merged = args.apply(base);

    assert_eq!(merged.name_patterns, ["*.log"]);
    assert_eq!(merged.older_than, None);
    assert_eq!(merged.older_than_days, Some(3));
    assert_eq!(merged.mode.as_deref(), Some("600"), "unset flags keep the file value");
    assert_eq!(merged.combine, CombineMode::Or);
}

#[test]
fn build_reads_criteria_file_and_applies_flags() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("criteria.json");
    write(&path, r#"{ "name_patterns": ["*.log"], "older_than_days": 5 }"#).unwrap();

    let now = Utc::now();
    let args = SelectionArgs {
        criteria: Some(path),
        newer_than_days: Some(30),
        ..SelectionArgs::default()
    };
    let criteria = args.build(now).expect("criteria");

    assert_eq!(criteria.active_count(), 3);
    assert!(criteria.matches(&info("a.log", 10, now)));
    assert!(!criteria.matches(&info("a.log", 1, now)));
    assert!(!criteria.matches(&info("a.log", 40, now)));
    assert!(!criteria.matches(&info("a.txt", 10, now)));
}

#[test]
fn build_reports_bad_input() {
    let tmp = tempfile::tempdir().expect("create temp dir");

    let missing = SelectionArgs {
        criteria: Some(tmp.path().join("absent.json")),
        ..SelectionArgs::default()
    };
    assert!(missing.build(Utc::now()).is_err());

    let path = tmp.path().join("empty.json");
    write(&path, "{}").unwrap();

    let bad_mode = SelectionArgs {
        criteria: Some(path.clone()),
        mode: Some("9z".into()),
        ..SelectionArgs::default()
    };
    let err = bad_mode.build(Utc::now()).unwrap_err();
    assert!(format!("{err:#}").contains("invalid file mode"), "{err:#}");

    let bad_glob = SelectionArgs {
        criteria: Some(path),
        patterns: vec!["[".into()],
        ..SelectionArgs::default()
    };
    let err = bad_glob.build(Utc::now()).unwrap_err();
    assert!(format!("{err:#}").contains("invalid file name pattern"), "{err:#}");
}

#[test]
fn print_result_writes_rows_and_errors() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    write(tmp.path().join("a.txt"), b"a").unwrap();
    write(tmp.path().join("b.txt"), b"b").unwrap();
    let result = find_files(tmp.path(), &FileSelectionCriteria::new()).expect("walk");

    let cfg = PrinterConfig {
        format: OutputFormat::Json,
        show_summary: false,
        ..PrinterConfig::default()
    };
    let mut printer = JsonPrinter::new(Vec::new(), Vec::new(), cfg);
    print_result(&mut printer, &result).expect("print");

    let (out, err) = printer.into_inner();
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    assert!(err.is_empty());
}
