//! Commands: one value per user gesture, consumed by [`crate::app::App::handle`].

use crate::selection::ClickModifiers;
use crate::table::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // === Selection ===
    /// Click on the row at display position `row`
    Select {
        row: usize,
        modifiers: ClickModifiers,
    },
    /// Move the cell cursor
    MoveCursor(Direction),
    /// Move the cursor up/down and range-select from the anchor (Shift+Arrow)
    ExtendSelection(Direction),

    // === Inline editing ===
    /// Start editing a cell (double-click, Enter)
    BeginEdit { row: usize, field: Field },
    EditInsert(char),
    /// Bracketed paste into the edit buffer
    EditInsertStr(String),
    EditBackspace,
    EditDelete,
    EditLeft,
    EditRight,
    EditHome,
    EditEnd,
    /// The edited cell lost focus
    CommitEdit,
    CancelEdit,

    // === Row mutations ===
    AddRow,
    DeleteSelected,
    Undo,
    Redo,

    // === Misc ===
    ExportCsv,
    ToggleHelp,
    Quit,
}

impl Command {
    /// Commands that operate on the edit buffer and keep the edit open.
    pub fn is_edit_input(&self) -> bool {
        matches!(
            self,
            Command::EditInsert(_)
                | Command::EditInsertStr(_)
                | Command::EditBackspace
                | Command::EditDelete
                | Command::EditLeft
                | Command::EditRight
                | Command::EditHome
                | Command::EditEnd
                | Command::CommitEdit
                | Command::CancelEdit
        )
    }
}
