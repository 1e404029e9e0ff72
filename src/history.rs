//! Undo/redo action log.
//!
//! Each recorded [`Action`] carries everything needed to reverse and to
//! reapply it. The same value moves between the undo and redo stacks and is
//! interpreted by direction.

use thiserror::Error;
use tracing::{debug, warn};

use crate::table::{CellRef, Row, RowId, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A row appended by "add row".
    Add { row: Row },
    /// A row removed by "delete selected", with its position at removal time.
    Delete { row: Row, index: usize },
    /// A committed inline edit.
    Edit {
        cell: CellRef,
        old_value: String,
        new_value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Add,
    Delete,
    Edit,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Add => "add row",
            ActionKind::Delete => "delete row",
            ActionKind::Edit => "edit cell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replay {
    Undo,
    Redo,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("row {0} is no longer in the table")]
    MissingRow(RowId),
    #[error("row {0} is already in the table")]
    DuplicateRow(RowId),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Add { .. } => ActionKind::Add,
            Action::Delete { .. } => ActionKind::Delete,
            Action::Edit { .. } => ActionKind::Edit,
        }
    }

    /// Apply the inverse (undo) or forward (redo) effect to `table`.
    ///
    /// Checks that the referenced row resolves before touching the table, so
    /// an error always leaves the table as it was.
    pub fn apply(&mut self, table: &mut Table, replay: Replay) -> Result<(), ReplayError> {
        match self {
            Action::Add { row } => match replay {
                Replay::Undo => {
                    let (_, removed) = table
                        .remove(row.id)
                        .ok_or(ReplayError::MissingRow(row.id))?;
                    *row = removed;
                    Ok(())
                }
                Replay::Redo => {
                    if table.contains(row.id) {
                        return Err(ReplayError::DuplicateRow(row.id));
                    }
                    table.push(row.clone());
                    Ok(())
                }
            },
            Action::Delete { row, index } => match replay {
                Replay::Undo => {
                    if table.contains(row.id) {
                        return Err(ReplayError::DuplicateRow(row.id));
                    }
                    table.insert(*index, row.clone());
                    Ok(())
                }
                Replay::Redo => {
                    let (pos, removed) = table
                        .remove(row.id)
                        .ok_or(ReplayError::MissingRow(row.id))?;
                    *row = removed;
                    *index = pos;
                    Ok(())
                }
            },
            Action::Edit {
                cell,
                old_value,
                new_value,
            } => {
                let target = table
                    .get_mut(cell.row)
                    .ok_or(ReplayError::MissingRow(cell.row))?;
                let value = match replay {
                    Replay::Undo => old_value.clone(),
                    Replay::Redo => new_value.clone(),
                };
                target.set_cell(cell.field, value);
                Ok(())
            }
        }
    }
}

/// Linear undo history: recording a new action discards the redo branch.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
    /// 0 = unlimited
    max_depth: usize,
}

impl ActionLog {
    /// Unlimited history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History that forgets its oldest entries beyond `max_depth` (0 = unlimited).
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn record(&mut self, action: Action) {
        debug!(kind = ?action.kind(), "record action");
        self.redo_stack.clear();
        self.undo_stack.push(action);
        if self.max_depth > 0 && self.undo_stack.len() > self.max_depth {
            let excess = self.undo_stack.len() - self.max_depth;
            self.undo_stack.drain(..excess);
        }
    }

    /// Pop the newest action, reverse it, and move it to the redo stack.
    /// `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self, table: &mut Table) -> Result<Option<ActionKind>, ReplayError> {
        let Some(mut action) = self.undo_stack.pop() else {
            return Ok(None);
        };
        match action.apply(table, Replay::Undo) {
            Ok(()) => {
                let kind = action.kind();
                self.redo_stack.push(action);
                Ok(Some(kind))
            }
            Err(e) => {
                warn!(error = %e, kind = ?action.kind(), "dropping stale action on undo");
                Err(e)
            }
        }
    }

    /// Pop the newest undone action, reapply it, and move it back to undo.
    pub fn redo(&mut self, table: &mut Table) -> Result<Option<ActionKind>, ReplayError> {
        let Some(mut action) = self.redo_stack.pop() else {
            return Ok(None);
        };
        match action.apply(table, Replay::Redo) {
            Ok(()) => {
                let kind = action.kind();
                self.undo_stack.push(action);
                Ok(Some(kind))
            }
            Err(e) => {
                warn!(error = %e, kind = ?action.kind(), "dropping stale action on redo");
                Err(e)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Field, RowContent};

    fn abc() -> Table {
        Table::from_contents([
            RowContent::new("A", "$1"),
            RowContent::new("B", "$2"),
            RowContent::new("C", "$3"),
        ])
    }

    #[test]
    fn empty_log_is_a_noop() {
        let mut t = abc();
        let mut log = ActionLog::new();
        assert_eq!(log.undo(&mut t), Ok(None));
        assert_eq!(log.redo(&mut t), Ok(None));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn depth_limit_drops_oldest() {
        let mut t = abc();
        let mut log = ActionLog::with_max_depth(2);
        let id = t.id_at(0).unwrap();
        for (old, new) in [("A", "A1"), ("A1", "A2"), ("A2", "A3")] {
            t.get_mut(id).unwrap().set_cell(Field::Company, new.into());
            log.record(Action::Edit {
                cell: CellRef::new(id, Field::Company),
                old_value: old.into(),
                new_value: new.into(),
            });
        }
        assert_eq!(log.undo_len(), 2);
        log.undo(&mut t).unwrap();
        log.undo(&mut t).unwrap();
        assert_eq!(log.undo(&mut t), Ok(None));
        assert_eq!(t.get(id).unwrap().company, "A1");
    }

    #[test]
    fn stale_edit_is_rejected_and_dropped() {
        let mut t = abc();
        let mut log = ActionLog::new();
        let id = t.id_at(1).unwrap();
        log.record(Action::Edit {
            cell: CellRef::new(id, Field::Company),
            old_value: "B".into(),
            new_value: "Bee".into(),
        });
        // Removed behind the log's back.
        t.remove(id);
        let before = t.contents();

        assert_eq!(log.undo(&mut t), Err(ReplayError::MissingRow(id)));
        assert_eq!(t.contents(), before);
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }

    #[test]
    fn delete_undo_reinserts_at_original_position() {
        let mut t = abc();
        let mut log = ActionLog::new();
        let b = t.id_at(1).unwrap();
        let (index, row) = t.remove(b).unwrap();
        log.record(Action::Delete { row, index });

        log.undo(&mut t).unwrap();
        assert_eq!(t.position(b), Some(1));
        log.redo(&mut t).unwrap();
        assert!(!t.contains(b));
    }
}
