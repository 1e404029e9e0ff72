//! Row selection state: the selected set and the range-select anchor.

use std::collections::HashSet;

use crate::table::{RowId, Table};

/// Modifier keys held during a row click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    /// Toggle without clearing other rows (Ctrl/Alt).
    pub additive: bool,
    /// Extend from the anchor (Shift).
    pub range: bool,
}

impl ClickModifiers {
    pub const NONE: Self = Self {
        additive: false,
        range: false,
    };
    pub const ADDITIVE: Self = Self {
        additive: true,
        range: false,
    };
    pub const RANGE: Self = Self {
        additive: false,
        range: true,
    };
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    rows: HashSet<RowId>,
    anchor: Option<RowId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<RowId> {
        self.anchor
    }

    pub fn is_selected(&self, id: RowId) -> bool {
        self.rows.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain click: clear everything, then toggle `row` (so it ends up
    /// selected). Additive click: toggle `row` only. Both move the anchor.
    pub fn select_single(&mut self, row: RowId, additive: bool) {
        if !additive {
            self.rows.clear();
        }
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
        self.anchor = Some(row);
    }

    /// Mark every row between `anchor` and `target` (inclusive, either
    /// direction). Rows outside the range keep their marks; the anchor is not
    /// moved. Returns false if either row is not in the table.
    pub fn select_range(&mut self, table: &Table, anchor: RowId, target: RowId) -> bool {
        let (Some(a), Some(b)) = (table.position(anchor), table.position(target)) else {
            return false;
        };
        let (lo, hi) = (a.min(b), a.max(b));
        self.rows
            .extend(table.rows()[lo..=hi].iter().map(|r| r.id));
        true
    }

    /// Row click dispatch: range-select when the range modifier is held and a
    /// live anchor exists, otherwise single/additive select.
    pub fn click(&mut self, table: &Table, row: RowId, modifiers: ClickModifiers) {
        if !table.contains(row) {
            return;
        }
        if modifiers.range
            && let Some(anchor) = self.anchor
            && self.select_range(table, anchor, row)
        {
            return;
        }
        self.select_single(row, modifiers.additive);
    }

    /// Selected rows in current table order.
    pub fn selected_in_order(&self, table: &Table) -> Vec<RowId> {
        table
            .iter()
            .filter(|r| self.rows.contains(&r.id))
            .map(|r| r.id)
            .collect()
    }

    /// Forget rows that have left the table, including a stale anchor.
    pub fn prune(&mut self, table: &Table) {
        self.rows.retain(|id| table.contains(*id));
        if self.anchor.is_some_and(|a| !table.contains(a)) {
            self.anchor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RowContent;

    fn table(n: usize) -> Table {
        Table::from_contents((0..n).map(|i| RowContent::new(format!("C{i}"), "$0")))
    }

    #[test]
    fn additive_click_toggles_off() {
        let t = table(3);
        let mut s = Selection::new();
        let r0 = t.id_at(0).unwrap();
        s.click(&t, r0, ClickModifiers::NONE);
        s.click(&t, r0, ClickModifiers::ADDITIVE);
        assert!(s.is_empty());
        assert_eq!(s.anchor(), Some(r0));
    }

    #[test]
    fn plain_click_on_selected_row_keeps_it_selected() {
        let t = table(3);
        let mut s = Selection::new();
        let r1 = t.id_at(1).unwrap();
        s.click(&t, r1, ClickModifiers::NONE);
        s.click(&t, r1, ClickModifiers::NONE);
        assert_eq!(s.selected_in_order(&t), vec![r1]);
    }

    #[test]
    fn range_without_anchor_falls_back_to_single() {
        let t = table(4);
        let mut s = Selection::new();
        let r2 = t.id_at(2).unwrap();
        s.click(&t, r2, ClickModifiers::RANGE);
        assert_eq!(s.selected_in_order(&t), vec![r2]);
        assert_eq!(s.anchor(), Some(r2));
    }

    #[test]
    fn prune_clears_stale_anchor() {
        let mut t = table(3);
        let mut s = Selection::new();
        let r1 = t.id_at(1).unwrap();
        s.click(&t, r1, ClickModifiers::NONE);
        t.remove(r1);
        s.prune(&t);
        assert!(s.is_empty());
        assert_eq!(s.anchor(), None);
    }
}
