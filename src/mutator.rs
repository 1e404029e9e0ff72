//! Row mutations that record their own inverse into the action log.

use tracing::{debug, info};

use crate::history::{Action, ActionLog};
use crate::selection::Selection;
use crate::table::{CellRef, NEW_COMPANY, NEW_REVENUE, RowContent, RowId, Table};

/// An inline edit in progress: the cell and its content when editing began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub cell: CellRef,
    pub old_value: String,
}

/// Borrows the table and the session's action log for one mutation.
pub struct RowMutator<'a> {
    table: &'a mut Table,
    log: &'a mut ActionLog,
}

impl<'a> RowMutator<'a> {
    pub fn new(table: &'a mut Table, log: &'a mut ActionLog) -> Self {
        Self { table, log }
    }

    /// Append a placeholder row and record it.
    pub fn add_row(&mut self) -> RowId {
        let id = self
            .table
            .push_new(RowContent::new(NEW_COMPANY, NEW_REVENUE));
        if let Some(row) = self.table.get(id) {
            self.log.record(Action::Add { row: row.clone() });
        }
        info!(row = %id, rows = self.table.len(), "added row");
        id
    }

    /// Remove every selected row in table order, one `Delete` action each.
    /// Returns the number of rows removed.
    pub fn delete_selected(&mut self, selection: &Selection) -> usize {
        let ids = selection.selected_in_order(self.table);
        let mut removed = 0;
        for id in ids {
            // Position is taken after earlier removals so undo replays cleanly.
            if let Some((index, row)) = self.table.remove(id) {
                self.log.record(Action::Delete { row, index });
                removed += 1;
            }
        }
        if removed > 0 {
            info!(removed, rows = self.table.len(), "deleted selected rows");
        }
        removed
    }

    /// Capture the cell's current content. `None` if the row is gone.
    pub fn begin_edit(&self, cell: CellRef) -> Option<PendingEdit> {
        let old_value = self.table.cell_text(cell)?.to_string();
        debug!(row = %cell.row, field = ?cell.field, "begin edit");
        Some(PendingEdit { cell, old_value })
    }

    /// Write `content` into the edited cell. Records an `Edit` only if the
    /// content changed. Returns whether an action was recorded.
    pub fn commit_edit(&mut self, pending: PendingEdit, content: String) -> bool {
        let Some(row) = self.table.get_mut(pending.cell.row) else {
            debug!(row = %pending.cell.row, "edited row vanished; dropping edit");
            return false;
        };
        if content == pending.old_value {
            row.set_cell(pending.cell.field, content);
            return false;
        }
        row.set_cell(pending.cell.field, content.clone());
        info!(row = %pending.cell.row, field = ?pending.cell.field, "committed edit");
        self.log.record(Action::Edit {
            cell: pending.cell,
            old_value: pending.old_value,
            new_value: content,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::ClickModifiers;
    use crate::table::Field;

    #[test]
    fn unchanged_commit_records_nothing() {
        let mut table = Table::from_contents([RowContent::new("A", "$1")]);
        let mut log = ActionLog::new();
        let cell = CellRef::new(table.id_at(0).unwrap(), Field::Company);
        let mut m = RowMutator::new(&mut table, &mut log);
        let pending = m.begin_edit(cell).unwrap();
        assert!(!m.commit_edit(pending, "A".into()));
        assert!(!log.can_undo());
    }

    #[test]
    fn delete_records_positions_after_earlier_removals() {
        let mut table = Table::from_contents(
            ["a", "b", "c", "d", "e"].map(|c| RowContent::new(c, "$0")),
        );
        let mut log = ActionLog::new();
        let mut sel = Selection::new();
        let b = table.id_at(1).unwrap();
        let d = table.id_at(3).unwrap();
        sel.click(&table, b, ClickModifiers::NONE);
        sel.click(&table, d, ClickModifiers::ADDITIVE);

        let n = RowMutator::new(&mut table, &mut log).delete_selected(&sel);
        assert_eq!(n, 2);
        assert_eq!(log.undo_len(), 2);

        log.undo(&mut table).unwrap();
        log.undo(&mut table).unwrap();
        let names: Vec<_> = table.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d", "e"]);
    }
}
