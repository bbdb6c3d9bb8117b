use super::*;
use chrono::TimeZone;
use std::{
    fs::{self, write},
    time::{Duration, UNIX_EPOCH},
};

fn sample() -> AugmentedFileInfo {
    let modified = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    AugmentedFileInfo::new("report.txt", 42, 0o644, modified, false)
}

#[test]
fn to_utc_handles_none_and_epoch_offsets() {
    let cases: &[(Option<SystemTime>, i64)] = &[
        (None, 0),
        (Some(UNIX_EPOCH), 0),
        (Some(UNIX_EPOCH + Duration::from_secs(42)), 42),
    ];

    for (input, expected) in cases {
        assert_eq!(to_utc(*input).timestamp(), *expected, "input: {:?}", input);
    }
}

#[test]
fn from_metadata_copies_os_fields() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("file.txt");
    write(&path, b"hello world").expect("write file");

    let meta = fs::metadata(&path).expect("metadata");
    let info = AugmentedFileInfo::with_dir_path(tmp.path(), "file.txt", &meta)
        .expect("dir path accepted");

    assert_eq!(info.name(), "file.txt");
    assert_eq!(info.size(), 11);
    assert!(!info.is_dir());
    assert_eq!(info.dir_path(), Some(tmp.path()));
    assert_eq!(info.full_path(), Some(path));
    assert_eq!(info.modified(), DateTime::<Utc>::from(meta.modified().unwrap()));
}

#[cfg(unix)]
#[test]
fn from_metadata_keeps_permission_bits_only() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("script.sh");
    write(&path, b"#!/bin/sh").expect("write file");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).expect("chmod");

    let info = AugmentedFileInfo::from_metadata("script.sh", &fs::metadata(&path).unwrap());
    assert_eq!(info.mode(), 0o750);
}

#[test]
fn directories_report_zero_size() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let info = AugmentedFileInfo::from_metadata("tmp", &fs::metadata(tmp.path()).unwrap());
    assert!(info.is_dir());
    assert_eq!(info.size(), 0);
}

#[test]
fn set_dir_path_rejects_blank_and_keeps_spaces() {
    let mut info = sample();

    assert!(matches!(info.set_dir_path(Path::new("   ")), Err(PathError::Empty)));
    assert_eq!(info.dir_path(), None);

    let cases: &[(&str, &str)] = &[
        ("/var/log/", "/var/log"),
        ("/srv/archive ", "/srv/archive "),
        (" /srv/lead", " /srv/lead"),
    ];
    for (input, expected) in cases {
        info.set_dir_path(Path::new(input)).expect("valid dir");
        assert_eq!(info.dir_path(), Some(Path::new(expected)), "input: {input:?}");
    }
}

#[test]
fn equality_ignores_initialization_time() {
    let a = sample();
    std::thread::sleep(Duration::from_millis(2));
    let b = sample();

    assert_ne!(a.initialized_at(), b.initialized_at());
    assert_eq!(a, b);

    let mut c = b.clone();
    c.set_size(43);
    assert_ne!(a, c);

    let mut d = a.clone();
    d.set_dir_path(Path::new("/elsewhere")).unwrap();
    assert_ne!(a, d);
}

#[test]
fn setters_replace_fields() {
    let mut info = sample();
    let later = info.modified() + chrono::TimeDelta::days(1);

    info.set_name("other.log");
    info.set_mode(0o600);
    info.set_modified(later);
    info.set_is_dir(true);

    assert_eq!(info.name(), "other.log");
    assert_eq!(info.mode(), 0o600);
    assert_eq!(info.modified(), later);
    assert!(info.is_dir());
}
