use std::fmt;

/// Content given to a freshly added row.
pub const NEW_COMPANY: &str = "New Company";
pub const NEW_REVENUE: &str = "$0";

/// Stable identity of a row for the lifetime of a session. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// The editable columns of a row. The `#` column is derived and not a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Company,
    Revenue,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Company, Field::Revenue];

    pub fn title(self) -> &'static str {
        match self {
            Field::Company => "Company",
            Field::Revenue => "Revenue",
        }
    }

    /// Map a grid column (0 = `#`, 1 = Company, 2 = Revenue) to a field.
    pub fn from_column(col: usize) -> Option<Field> {
        match col {
            1 => Some(Field::Company),
            2 => Some(Field::Revenue),
            _ => None,
        }
    }

    pub fn column(self) -> usize {
        match self {
            Field::Company => 1,
            Field::Revenue => 2,
        }
    }
}

/// A cell addressed by stable row identity rather than position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: RowId,
    pub field: Field,
}

impl CellRef {
    pub fn new(row: RowId, field: Field) -> Self {
        Self { row, field }
    }
}

/// Row content without identity, as loaded from a seed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContent {
    pub company: String,
    pub revenue: String,
}

impl RowContent {
    pub fn new(company: impl Into<String>, revenue: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            revenue: revenue.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub company: String,
    pub revenue: String,
}

impl Row {
    pub fn cell(&self, field: Field) -> &str {
        match field {
            Field::Company => &self.company,
            Field::Revenue => &self.revenue,
        }
    }

    pub fn set_cell(&mut self, field: Field, value: String) {
        match field {
            Field::Company => self.company = value,
            Field::Revenue => self.revenue = value,
        }
    }

    pub fn content(&self) -> RowContent {
        RowContent::new(self.company.clone(), self.revenue.clone())
    }
}

/// Ordered row collection. Position is presentation; `RowId` is identity.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Row>,
    next_id: u64,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contents(contents: impl IntoIterator<Item = RowContent>) -> Self {
        let mut table = Self::new();
        for content in contents {
            table.push_new(content);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Allocate an id and append a row with the given content.
    pub fn push_new(&mut self, content: RowContent) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(Row {
            id,
            company: content.company,
            revenue: content.revenue,
        });
        id
    }

    /// Append an existing row (keeps its id).
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Insert an existing row at `index`, clamped to the end of the table.
    /// Returns the position the row landed at.
    pub fn insert(&mut self, index: usize, row: Row) -> usize {
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
        index
    }

    /// Remove a row by identity, returning its former position and the row.
    pub fn remove(&mut self, id: RowId) -> Option<(usize, Row)> {
        let pos = self.position(id)?;
        Some((pos, self.rows.remove(pos)))
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    pub fn row_at(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn id_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(|r| r.id)
    }

    pub fn cell_text(&self, cell: CellRef) -> Option<&str> {
        self.get(cell.row).map(|r| r.cell(cell.field))
    }

    /// Contents in table order, without identities.
    pub fn contents(&self) -> Vec<RowContent> {
        self.rows.iter().map(Row::content).collect()
    }
}
