use std::cmp::min;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::command::{Command, Direction};
use crate::history::ActionLog;
use crate::mutator::{PendingEdit, RowMutator};
use crate::selection::{ClickModifiers, Selection};
use crate::store;
use crate::table::{CellRef, Field, Table};
use crate::ui::GridLayout;

/// Number of grid columns: `#`, Company, Revenue.
pub const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Editing {
        cursor: usize, // byte offset in edit buffer
    },
}

/// One table-editing session: the rows, the selection, and the action log
/// lent to the row mutator.
pub struct App {
    pub should_quit: bool,

    // UI state
    pub mode: AppMode,
    pub status: String,
    pub show_help: bool,

    // Table data
    pub table: Table,
    pub selection: Selection,
    pub log: ActionLog,

    // Cell cursor (col 0 is the derived `#` column)
    pub sel_row: usize,
    pub sel_col: usize,

    // Editing
    pub pending_edit: Option<PendingEdit>,
    pub edit_buffer: String,

    pub export_path: PathBuf,

    /// Geometry of the last drawn grid, for mouse hit-testing
    pub grid: GridLayout,
}

impl App {
    pub fn new(table: Table, log: ActionLog, export_path: PathBuf) -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            status: "Click to select, double-click to edit. a add | d delete | Ctrl+Z undo | Ctrl+X redo | ? help"
                .into(),
            show_help: true,
            table,
            selection: Selection::new(),
            log,
            sel_row: 0,
            sel_col: 1,
            pending_edit: None,
            edit_buffer: String::new(),
            export_path,
            grid: GridLayout::default(),
        }
    }

    /// Apply one command to completion.
    pub fn handle(&mut self, cmd: Command) {
        debug!(?cmd, "handle command");
        // Any other gesture moves focus away from the edited cell.
        if self.pending_edit.is_some() && !cmd.is_edit_input() {
            self.commit_edit();
        }

        match cmd {
            Command::Select { row, modifiers } => self.click_row(row, modifiers),
            Command::MoveCursor(dir) => self.move_cursor(dir),
            Command::ExtendSelection(dir) => self.extend_selection(dir),
            Command::BeginEdit { row, field } => self.begin_edit(row, field),
            Command::EditInsert(ch) => self.edit_input_insert(ch),
            Command::EditInsertStr(s) => self.edit_input_insert_str(&s),
            Command::EditBackspace => self.edit_input_backspace(),
            Command::EditDelete => self.edit_input_delete(),
            Command::EditLeft => self.edit_input_left(),
            Command::EditRight => self.edit_input_right(),
            Command::EditHome => self.edit_input_home(),
            Command::EditEnd => self.edit_input_end(),
            Command::CommitEdit => self.commit_edit(),
            Command::CancelEdit => self.cancel_edit(),
            Command::AddRow => self.add_row(),
            Command::DeleteSelected => self.delete_selected(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::ExportCsv => self.export_csv(),
            Command::ToggleHelp => {
                self.show_help = !self.show_help;
                self.status = if self.show_help {
                    "Showing help (press ? to close)".into()
                } else {
                    "Closed help".into()
                };
            }
            Command::Quit => self.should_quit = true,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, AppMode::Editing { .. })
    }

    /// The editable cell under the cursor, if any.
    pub fn cursor_cell(&self) -> Option<CellRef> {
        let field = Field::from_column(self.sel_col)?;
        let row = self.table.id_at(self.sel_row)?;
        Some(CellRef::new(row, field))
    }

    // ===== Selection =====

    fn click_row(&mut self, row: usize, modifiers: ClickModifiers) {
        let Some(id) = self.table.id_at(row) else {
            return;
        };
        self.selection.click(&self.table, id, modifiers);
        self.sel_row = row;
        self.status = format!("{} row(s) selected", self.selection.len());
    }

    fn move_cursor(&mut self, dir: Direction) {
        if self.table.is_empty() {
            return;
        }
        match dir {
            Direction::Up => self.sel_row = self.sel_row.saturating_sub(1),
            Direction::Down => self.sel_row = min(self.sel_row + 1, self.table.len() - 1),
            Direction::Left => self.sel_col = self.sel_col.saturating_sub(1),
            Direction::Right => self.sel_col = min(self.sel_col + 1, GRID_COLUMNS - 1),
        }
    }

    fn extend_selection(&mut self, dir: Direction) {
        if self.table.is_empty() {
            return;
        }
        if self.selection.anchor().is_none() {
            self.click_row(self.sel_row, ClickModifiers::NONE);
        }
        self.move_cursor(dir);
        self.click_row(self.sel_row, ClickModifiers::RANGE);
    }

    // ===== Editing =====

    fn begin_edit(&mut self, row: usize, field: Field) {
        let Some(id) = self.table.id_at(row) else {
            return;
        };
        let Some(pending) =
            RowMutator::new(&mut self.table, &mut self.log).begin_edit(CellRef::new(id, field))
        else {
            return;
        };
        self.edit_buffer = pending.old_value.clone();
        self.pending_edit = Some(pending);
        self.mode = AppMode::Editing {
            cursor: self.edit_buffer.len(),
        };
        self.sel_row = row;
        self.sel_col = field.column();
        self.status = "Editing: Enter to save, Esc to cancel".into();
    }

    fn commit_edit(&mut self) {
        self.mode = AppMode::Normal;
        let Some(pending) = self.pending_edit.take() else {
            return;
        };
        let content = std::mem::take(&mut self.edit_buffer);
        let recorded = RowMutator::new(&mut self.table, &mut self.log).commit_edit(pending, content);
        self.status = if recorded {
            "Cell updated".into()
        } else {
            "No changes".into()
        };
    }

    fn cancel_edit(&mut self) {
        if self.pending_edit.take().is_none() {
            return;
        }
        self.mode = AppMode::Normal;
        self.edit_buffer.clear();
        self.status = "Edit cancelled".into();
    }

    fn edit_input_insert(&mut self, ch: char) {
        if let AppMode::Editing { ref mut cursor } = self.mode {
            self.edit_buffer.insert(*cursor, ch);
            *cursor += ch.len_utf8();
        }
    }

    fn edit_input_insert_str(&mut self, s: &str) {
        if let AppMode::Editing { ref mut cursor } = self.mode {
            // Cells are single-line.
            let s: String = s.chars().filter(|c| !c.is_control()).collect();
            self.edit_buffer.insert_str(*cursor, &s);
            *cursor += s.len();
        }
    }

    fn edit_input_backspace(&mut self) {
        if let AppMode::Editing { ref mut cursor } = self.mode
            && *cursor > 0
        {
            let new_cursor = prev_boundary(&self.edit_buffer, *cursor);
            self.edit_buffer.drain(new_cursor..*cursor);
            *cursor = new_cursor;
        }
    }

    fn edit_input_delete(&mut self) {
        if let AppMode::Editing { ref mut cursor } = self.mode
            && *cursor < self.edit_buffer.len()
        {
            let next = next_boundary(&self.edit_buffer, *cursor);
            self.edit_buffer.drain(*cursor..next);
        }
    }

    fn edit_input_left(&mut self) {
        if let AppMode::Editing { ref mut cursor } = self.mode {
            *cursor = prev_boundary(&self.edit_buffer, *cursor);
        }
    }

    fn edit_input_right(&mut self) {
        if let AppMode::Editing { ref mut cursor } = self.mode {
            *cursor = next_boundary(&self.edit_buffer, *cursor);
        }
    }

    fn edit_input_home(&mut self) {
        if let AppMode::Editing { ref mut cursor } = self.mode {
            *cursor = 0;
        }
    }

    fn edit_input_end(&mut self) {
        if let AppMode::Editing { ref mut cursor } = self.mode {
            *cursor = self.edit_buffer.len();
        }
    }

    // ===== Row mutations =====

    fn add_row(&mut self) {
        RowMutator::new(&mut self.table, &mut self.log).add_row();
        self.sel_row = self.table.len() - 1;
        self.status = format!("Added row {}", self.table.len());
    }

    fn delete_selected(&mut self) {
        let removed =
            RowMutator::new(&mut self.table, &mut self.log).delete_selected(&self.selection);
        if removed == 0 {
            self.status = "No rows selected".into();
            return;
        }
        self.after_structural_change();
        self.status = format!("Deleted {removed} row(s)");
    }

    fn undo(&mut self) {
        self.status = match self.log.undo(&mut self.table) {
            Ok(Some(kind)) => format!("Undo: {}", kind.label()),
            Ok(None) => "Nothing to undo".into(),
            Err(e) => {
                warn!(error = %e, "undo skipped");
                format!("Undo skipped: {e}")
            }
        };
        self.after_structural_change();
    }

    fn redo(&mut self) {
        self.status = match self.log.redo(&mut self.table) {
            Ok(Some(kind)) => format!("Redo: {}", kind.label()),
            Ok(None) => "Nothing to redo".into(),
            Err(e) => {
                warn!(error = %e, "redo skipped");
                format!("Redo skipped: {e}")
            }
        };
        self.after_structural_change();
    }

    fn after_structural_change(&mut self) {
        self.selection.prune(&self.table);
        self.sel_row = self.sel_row.min(self.table.len().saturating_sub(1));
    }

    fn export_csv(&mut self) {
        self.status = match store::export_csv(&self.table, &self.export_path) {
            Ok(n) => format!("Exported {n} rows to {}", self.export_path.display()),
            Err(e) => {
                warn!(error = %e, path = %self.export_path.display(), "export failed");
                format!("Export failed: {e}")
            }
        };
    }
}

fn prev_boundary(s: &str, idx: usize) -> usize {
    s[..idx]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_boundary(s: &str, idx: usize) -> usize {
    s[idx..]
        .chars()
        .next()
        .map(|c| idx + c.len_utf8())
        .unwrap_or(s.len())
}
