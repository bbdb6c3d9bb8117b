use super::*;
use chrono::{TimeDelta, TimeZone};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

fn file(name: &str, age_days: i64, mode: u32) -> AugmentedFileInfo {
    AugmentedFileInfo::new(name, 10, mode, now() - TimeDelta::days(age_days), false)
}

#[test]
fn no_active_criteria_selects_everything() {
    let criteria = FileSelectionCriteria::new()
        .with_patterns(["", "   "])
        .expect("blank patterns are fine");

    assert_eq!(criteria.active_count(), 0);
    assert!(!criteria.are_patterns_active());

    for f in [file("a.log", 10, 0o644), file("b", 0, 0), file(".hidden", 1000, 0o600)] {
        assert!(criteria.matches(&f), "{} should match", f.name());
    }

    let or_mode = FileSelectionCriteria::new().combine(CombineMode::Or);
    assert!(or_mode.matches(&file("x.txt", 1, 0o644)));
}

#[test]
fn patterns_match_any_entry_regardless_of_combine_mode() {
    let criteria = FileSelectionCriteria::new()
        .with_patterns(["*.log", " current*.txt "])
        .expect("valid patterns");

    assert_eq!(criteria.patterns(), &["*.log".to_owned(), "current*.txt".to_owned()]);

    let cases: &[(&str, bool)] = &[
        ("a.log", true),
        ("current_2024.txt", true),
        ("old.txt", false),
        ("log", false),
    ];

    for combine in [CombineMode::And, CombineMode::Or] {
        let c = criteria.clone().combine(combine);
        for (name, expected) in cases {
            assert_eq!(
                c.matches(&file(name, 1, 0o644)),
                *expected,
                "{:?} with {}",
                name,
                combine
            );
        }
    }
}

#[test]
fn star_does_not_cross_separators() {
    let criteria = FileSelectionCriteria::new()
        .with_patterns(["*.log"])
        .expect("valid pattern");
    assert!(!criteria.matches(&file("sub/a.log", 1, 0)));
}

#[test]
fn invalid_pattern_is_rejected() {
    match FileSelectionCriteria::new().with_patterns(["[unclosed"]) {
        Err(CriteriaError::Pattern { pattern, .. }) => assert_eq!(pattern, "[unclosed"),
        other => panic!("expected pattern error, got {:?}", other),
    }
}

#[test]
fn time_bounds_are_strict() {
    let boundary = now() - TimeDelta::days(5);
    let at_boundary = AugmentedFileInfo::new("edge", 0, 0, boundary, false);

    let older = FileSelectionCriteria::new().older_than(boundary);
    assert!(older.matches(&file("old", 10, 0)));
    assert!(!older.matches(&file("new", 1, 0)));
    assert!(!older.matches(&at_boundary));

    let newer = FileSelectionCriteria::new().newer_than(boundary);
    assert!(newer.matches(&file("new", 1, 0)));
    assert!(!newer.matches(&file("old", 10, 0)));
    assert!(!newer.matches(&at_boundary));
}

#[test]
fn mode_requires_exact_equality() {
    let criteria = FileSelectionCriteria::new().with_mode(0o644);
    assert_eq!(criteria.active_count(), 1);
    assert!(criteria.matches(&file("a", 1, 0o644)));
    assert!(!criteria.matches(&file("b", 1, 0o640)));
    assert!(!criteria.matches(&file("c", 1, 0o4644)));
}

#[test]
fn and_mode_fails_when_any_active_criterion_fails() {
    let criteria = FileSelectionCriteria::new()
        .with_patterns(["*.log"])
        .expect("valid pattern")
        .older_than(now() - TimeDelta::days(5))
        .with_mode(0o644);

    assert_eq!(criteria.active_count(), 3);
    assert!(criteria.matches(&file("a.log", 10, 0o644)));
    // Pattern and mode match, age does not.
    assert!(!criteria.matches(&file("a.log", 1, 0o644)));
    // Age and mode match, pattern does not.
    assert!(!criteria.matches(&file("b.txt", 10, 0o644)));
}

#[test]
fn or_mode_needs_one_active_match() {
    let criteria = FileSelectionCriteria::new()
        .with_patterns(["*.log"])
        .expect("valid pattern")
        .newer_than(now() - TimeDelta::days(2))
        .combine(CombineMode::Or);

    // Only the pattern matches.
    assert!(criteria.matches(&file("a.log", 30, 0)));
    // Only the age matches.
    assert!(criteria.matches(&file("b.txt", 1, 0)));
    // Nothing matches.
    assert!(!criteria.matches(&file("b.txt", 30, 0)));
}

#[test]
fn combine_mode_display_and_serde() {
    assert_eq!(CombineMode::And.to_string(), "AND File Select Criterion");
    assert_eq!(CombineMode::Or.to_string(), "OR File Select Criterion");
    assert_eq!(CombineMode::default(), CombineMode::And);

    let parsed: CombineMode = serde_json::from_str("\"or\"").expect("parse");
    assert_eq!(parsed, CombineMode::Or);
}
