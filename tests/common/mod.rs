//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use revenue_table::{ActionLog, App, Command, Field, RowContent, Table};

/// Session with rows A, B, C and unlimited history.
pub fn abc_app() -> App {
    app_with(&["A", "B", "C"])
}

pub fn app_with(names: &[&str]) -> App {
    let rows = names
        .iter()
        .enumerate()
        .map(|(i, n)| RowContent::new(*n, format!("${}", i + 1)));
    App::new(
        Table::from_contents(rows),
        ActionLog::new(),
        PathBuf::from("unused.csv"),
    )
}

/// Company names in table order.
pub fn companies(app: &App) -> Vec<String> {
    app.table.iter().map(|r| r.company.clone()).collect()
}

/// Display positions (0-based) of the selected rows.
pub fn selected_positions(app: &App) -> Vec<usize> {
    app.selection
        .selected_in_order(&app.table)
        .into_iter()
        .filter_map(|id| app.table.position(id))
        .collect()
}

/// Replace a cell's content through the edit commands.
pub fn edit(app: &mut App, row: usize, field: Field, text: &str) {
    app.handle(Command::BeginEdit { row, field });
    app.handle(Command::EditHome);
    for _ in 0..app.edit_buffer.chars().count() {
        app.handle(Command::EditDelete);
    }
    app.handle(Command::EditInsertStr(text.to_string()));
    app.handle(Command::CommitEdit);
}
