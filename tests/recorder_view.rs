// tests/recorder_view.rs
use chrono::NaiveDateTime;
use spotlog::config::options::RecorderOptions;
use spotlog::recorder::{RecordView, ViewKind};
use spotlog::row;

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2026-10-16 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

fn sheet() -> Vec<Vec<String>> {
    vec![
        row!["Timestamp", "Station", "Caller", "Phone", "Plate", "Category", "Description", "Staff", "Code"],
        row!["2026-10-15 20:00:00", "North", "Wang", "", "ABC-1234", "Payment", "card declined", "Lin", "20261015-001"],
        row!["2026-10-16 03:59:59", "South", "Chen", "", "", "Complaint", "rude guard", "Lin", "20261016-001"],
        row!["2026-10-16 04:00:00", "South", "Lee", "", "XYZ-9", "Gate / barrier", "gate stuck", "Hsu", "20261016-002"],
        row!["2026-10-16 11:30:00", "North", "Wu", "", "", "Payment", "coins jammed", "Hsu", "20261016-003"],
        row!["2026-10-16 09:15:00", "East", "Lai", "", "", "Other", "", "Lin", "20261016-004"],
    ]
}

#[test]
fn window_is_newest_first_and_inclusive() {
    let rows = sheet();
    let v = RecordView::build(&rows, "", now(), &RecorderOptions::default());
    assert_eq!(v.kind, ViewKind::Window);
    // 04:00:00 is exactly 8h back and stays; 03:59:59 drops out
    assert_eq!(v.row_ix, vec![4, 5, 3]);
}

#[test]
fn empty_window_falls_back_to_last_three() {
    let rows = sheet();
    let later = NaiveDateTime::parse_from_str("2026-10-18 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let v = RecordView::build(&rows, "", later, &RecorderOptions::default());
    assert_eq!(v.kind, ViewKind::Fallback);
    assert_eq!(v.row_ix, vec![5, 4, 3]);
    assert!(v.caption().contains("latest 3"));
}

#[test]
fn fallback_shows_everything_when_short() {
    let rows = sheet()[..3].to_vec();
    let later = NaiveDateTime::parse_from_str("2026-11-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let v = RecordView::build(&rows, "", later, &RecorderOptions::default());
    assert_eq!(v.row_ix, vec![2, 1]);
}

#[test]
fn search_is_case_insensitive_over_all_rows() {
    let rows = sheet();
    let v = RecordView::build(&rows, "  abc-1234 ", now(), &RecorderOptions::default());
    assert_eq!(v.kind, ViewKind::Search);
    // Outside the window, still found
    assert_eq!(v.row_ix, vec![1]);

    let v = RecordView::build(&rows, "payment", now(), &RecorderOptions::default());
    assert_eq!(v.row_ix, vec![4, 1]);
    assert_eq!(v.row(0).map(|r| r[2].as_str()), Some("Wu"));
}

#[test]
fn search_without_hits_is_empty() {
    let rows = sheet();
    let v = RecordView::build(&rows, "nobody", now(), &RecorderOptions::default());
    assert!(v.is_empty());
    assert_eq!(v.caption(), "No matches");
}

#[test]
fn unparseable_timestamps_never_enter_the_window() {
    let mut rows = sheet();
    rows.push(row!["soon", "West", "", "", "", "Other", "", "Lin", ""]);
    let v = RecordView::build(&rows, "", now(), &RecorderOptions::default());
    assert!(!v.row_ix.contains(&6));
}

#[test]
fn future_rows_are_not_recent() {
    let mut rows = sheet();
    rows.push(row!["2026-10-16 18:00:00", "West", "", "", "", "Other", "", "Lin", "20261016-005"]);
    let v = RecordView::build(&rows, "", now(), &RecorderOptions::default());
    assert_eq!(v.row_ix, vec![4, 5, 3]);

    // Still reachable by search
    let v = RecordView::build(&rows, "west", now(), &RecorderOptions::default());
    assert_eq!(v.row_ix, vec![6]);
}
