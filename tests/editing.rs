//! Inline cell editing: begin, commit on focus loss, cancel

mod common;

use common::{abc_app, edit};
use revenue_table::{ClickModifiers, Command, Field};

#[test]
fn test_unchanged_edit_records_nothing() {
    let mut app = abc_app();
    app.handle(Command::BeginEdit {
        row: 0,
        field: Field::Company,
    });
    app.handle(Command::CommitEdit);
    assert!(!app.log.can_undo());
    assert_eq!(app.status, "No changes");
}

#[test]
fn test_edit_back_to_original_records_nothing() {
    let mut app = abc_app();
    app.handle(Command::BeginEdit {
        row: 0,
        field: Field::Company,
    });
    app.handle(Command::EditInsert('x'));
    app.handle(Command::EditBackspace);
    app.handle(Command::CommitEdit);
    assert!(!app.log.can_undo());
}

#[test]
fn test_cancel_leaves_cell_untouched() {
    let mut app = abc_app();
    app.handle(Command::BeginEdit {
        row: 2,
        field: Field::Revenue,
    });
    app.handle(Command::EditInsert('0'));
    app.handle(Command::CancelEdit);
    assert_eq!(app.table.row_at(2).unwrap().revenue, "$3");
    assert!(!app.is_editing());
    assert!(!app.log.can_undo());
}

#[test]
fn test_focus_loss_commits_before_other_gestures() {
    let mut app = abc_app();
    app.handle(Command::BeginEdit {
        row: 1,
        field: Field::Company,
    });
    app.handle(Command::EditInsert('!'));
    app.handle(Command::Select {
        row: 0,
        modifiers: ClickModifiers::NONE,
    });
    assert!(!app.is_editing());
    assert_eq!(app.table.row_at(1).unwrap().company, "B!");
    assert_eq!(app.log.undo_len(), 1);
}

#[test]
fn test_undo_while_editing_commits_then_undoes() {
    let mut app = abc_app();
    app.handle(Command::BeginEdit {
        row: 0,
        field: Field::Company,
    });
    app.handle(Command::EditInsert('1'));
    app.handle(Command::Undo);
    assert_eq!(app.table.row_at(0).unwrap().company, "A");
    assert!(app.log.can_redo());
}

#[test]
fn test_begin_edit_on_other_cell_commits_first() {
    let mut app = abc_app();
    app.handle(Command::BeginEdit {
        row: 0,
        field: Field::Company,
    });
    app.handle(Command::EditInsert('a'));
    app.handle(Command::BeginEdit {
        row: 0,
        field: Field::Revenue,
    });
    assert_eq!(app.table.row_at(0).unwrap().company, "Aa");
    assert_eq!(app.edit_buffer, "$1");
    assert_eq!(app.log.undo_len(), 1);
}

#[test]
fn test_edit_of_missing_row_is_noop() {
    let mut app = abc_app();
    app.handle(Command::BeginEdit {
        row: 9,
        field: Field::Company,
    });
    assert!(!app.is_editing());
}

#[test]
fn test_repeated_edits_are_separate_undo_units() {
    let mut app = abc_app();
    edit(&mut app, 0, Field::Company, "A1");
    edit(&mut app, 0, Field::Company, "A2");
    app.handle(Command::Undo);
    assert_eq!(app.table.row_at(0).unwrap().company, "A1");
    app.handle(Command::Undo);
    assert_eq!(app.table.row_at(0).unwrap().company, "A");
}
