//! SQLite seeding and CSV export

mod common;

use common::abc_app;
use revenue_table::{Command, store};
use rusqlite::Connection;

#[test]
fn test_load_rows_by_column_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE revenue (id INTEGER PRIMARY KEY, revenue INTEGER, company TEXT);
         INSERT INTO revenue (revenue, company) VALUES (1200, 'Acme'), (NULL, 'Globex');",
    )
    .unwrap();
    drop(conn);

    let rows = store::load_rows(&path, "revenue").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].company, "Acme");
    assert_eq!(rows[0].revenue, "1200");
    assert_eq!(rows[1].revenue, "NULL");
}

#[test]
fn test_load_rows_falls_back_to_first_two_columns() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE firms (name TEXT, sales TEXT);
         INSERT INTO firms VALUES ('Initech', '$5');",
    )
    .unwrap();

    let rows = store::load_rows_from(&conn, "firms").unwrap();
    assert_eq!(rows[0].company, "Initech");
    assert_eq!(rows[0].revenue, "$5");
}

#[test]
fn test_load_rows_missing_table_errors() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(store::load_rows_from(&conn, "nope").is_err());
}

#[test]
fn test_export_csv_uses_derived_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut app = abc_app();
    app.export_path = path.clone();
    app.handle(Command::Select {
        row: 0,
        modifiers: revenue_table::ClickModifiers::NONE,
    });
    app.handle(Command::DeleteSelected);
    app.handle(Command::ExportCsv);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "#,Company,Revenue\n1,B,$2\n2,C,$3\n");
    assert!(app.status.starts_with("Exported 2 rows"));
}

#[test]
fn test_export_failure_is_reported_on_status() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = abc_app();
    app.export_path = dir.path().join("missing").join("out.csv");
    app.handle(Command::ExportCsv);
    assert!(app.status.starts_with("Export failed"));
}
