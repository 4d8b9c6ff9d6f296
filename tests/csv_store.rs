// tests/csv_store.rs
use std::fs;
use std::path::PathBuf;

use spotlog::config::options::{StoreKind, StoreOptions};
use spotlog::row;
use spotlog::store::{self, CsvStore, RowStore, StoreError};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("spotlog_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn quoted_cells_survive_update() {
    let dir = tmp_dir("quoted");
    let path = dir.join("nested").join("cases.csv");
    let mut st = CsvStore::new(&path);

    st.append(&row!["Timestamp", "Description"]).unwrap();
    st.append(&row!["2026-10-16 08:00:00", "said \"hi\", then left"]).unwrap();
    st.append(&row!["2026-10-16 08:05:00", "line one\nline two"]).unwrap();

    st.update(1, &row!["2026-10-16 08:00:00", "fixed, for real"]).unwrap();

    let rows = st.read_all().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][1], "fixed, for real");
    assert_eq!(rows[2][1], "line one\nline two");
}

#[test]
fn bad_indices_are_rejected() {
    let dir = tmp_dir("bounds");
    let mut st = CsvStore::new(dir.join("x.csv"));
    st.append(&row!["h"]).unwrap();
    st.append(&row!["a"]).unwrap();

    assert!(matches!(st.update(0, &row!["z"]), Err(StoreError::HeaderRow)));
    assert!(matches!(st.update(2, &row!["z"]), Err(StoreError::RowOutOfRange { index: 2, len: 2 })));
    assert_eq!(st.read_all().unwrap(), vec![row!["h"], row!["a"]]);
}

#[test]
fn open_dispatches_on_kind() {
    let dir = tmp_dir("open");
    let opts = StoreOptions { kind: StoreKind::Csv { path: dir.join("obs.csv") } };
    let mut st = store::open(&opts).unwrap();
    assert!(st.read_all().unwrap().is_empty());
    st.append(&row!["Timestamp", "Available"]).unwrap();
    assert!(st.describe().contains("obs.csv"));

    let sheets = StoreOptions {
        kind: StoreKind::Sheets { spreadsheet_id: "abc".into(), sheet: "Sheet1".into(), token: None },
    };
    assert!(matches!(store::open(&sheets), Err(StoreError::MissingCredentials(_))));
}

#[test]
fn append_after_hand_edit_without_final_newline() {
    let dir = tmp_dir("no_eol");
    let path = dir.join("obs.csv");
    fs::write(&path, "Timestamp,Available\n2026-10-16 08:00,12").unwrap();

    let mut st = CsvStore::new(&path);
    st.append(&row!["2026-10-16 09:00", "57"]).unwrap();

    assert_eq!(
        st.read_all().unwrap(),
        vec![
            row!["Timestamp", "Available"],
            row!["2026-10-16 08:00", "12"],
            row!["2026-10-16 09:00", "57"],
        ]
    );
}
