use crate::app::{App, AppMode, GRID_COLUMNS};
use crate::table::Field;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

const INDEX_WIDTH: u16 = 5;
const REVENUE_WIDTH: u16 = 16;
const COLUMN_SPACING: u16 = 1;
const HELP_WIDTH: u16 = 40;

/// Where the data grid landed on screen in the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridLayout {
    /// Area inside the border; the header occupies its first line
    pub inner: Rect,
    /// Index of the first visible row
    pub offset: usize,
    /// Left edge of each grid column
    pub col_starts: [u16; GRID_COLUMNS],
}

impl GridLayout {
    /// Map a screen position to `(row, column)`. `None` for the header,
    /// border, or empty space below the last drawn row.
    pub fn hit(&self, x: u16, y: u16, row_count: usize) -> Option<(usize, usize)> {
        let inner = self.inner;
        let first_data_y = inner.y.saturating_add(1);
        if x < inner.x || x >= inner.x + inner.width || y < first_data_y || y >= inner.y + inner.height {
            return None;
        }
        let row = self.offset + (y - first_data_y) as usize;
        if row >= row_count {
            return None;
        }
        let col = self
            .col_starts
            .iter()
            .rposition(|&start| x >= start)
            .unwrap_or(0);
        Some((row, col))
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)].as_ref())
        .split(f.size());

    let top = chunks[0];
    let status_area = chunks[1];

    if app.show_help {
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(HELP_WIDTH)].as_ref())
            .split(top);
        draw_grid(f, body_chunks[0], app);
        draw_help(f, body_chunks[1]);
    } else {
        draw_grid(f, top, app);
    }
    draw_status(f, status_area, app);
}

fn draw_grid(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Revenue ({} rows, {} selected)",
        app.table.len(),
        app.selection.len()
    ));
    let inner = block.inner(area);
    let widths = column_widths(inner.width);

    let header = Row::new(["#", Field::Company.title(), Field::Revenue.title()]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let editing_cursor = match app.mode {
        AppMode::Editing { cursor } => Some(cursor),
        AppMode::Normal => None,
    };
    let editing_cell = app.pending_edit.as_ref().map(|p| p.cell);

    let mut rows = Vec::with_capacity(app.table.len());
    for (r_idx, row) in app.table.iter().enumerate() {
        let selected = app.selection.is_selected(row.id);
        let cursor_col = (!app.is_editing() && r_idx == app.sel_row).then_some(app.sel_col);
        let cursor_style = Style::default().bg(Color::Blue).fg(Color::Black);
        let mut cells = Vec::with_capacity(GRID_COLUMNS);
        // Display index is positional and derived here.
        let mut index_cell = Cell::from((r_idx + 1).to_string());
        if cursor_col == Some(0) {
            index_cell = index_cell.style(cursor_style);
        }
        cells.push(index_cell);
        for field in Field::ALL {
            let is_edited = editing_cell.is_some_and(|c| c.row == row.id && c.field == field);
            let cell = if is_edited {
                let cursor = editing_cursor.unwrap_or(app.edit_buffer.len());
                let (before, after) = app.edit_buffer.split_at(cursor);
                Cell::from(Line::from(vec![
                    Span::raw(before.to_string()),
                    Span::styled("|", Style::default().fg(Color::Yellow)),
                    Span::raw(after.to_string()),
                ]))
                .style(Style::default().bg(Color::DarkGray).fg(Color::White))
            } else if cursor_col == Some(field.column()) {
                Cell::from(row.cell(field).to_string()).style(cursor_style)
            } else {
                Cell::from(row.cell(field).to_string())
            };
            cells.push(cell);
        }
        let mut r = Row::new(cells);
        if selected {
            r = r.style(Style::default().bg(Color::Rgb(60, 60, 110)).add_modifier(Modifier::BOLD));
        }
        rows.push(r);
    }

    let table = Table::new(rows, widths.map(Constraint::Length))
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING);

    let mut state = table_state(app);
    f.render_stateful_widget(table, area, &mut state);

    let mut col_starts = [inner.x; GRID_COLUMNS];
    let mut x = inner.x;
    for (i, w) in widths.iter().enumerate() {
        col_starts[i] = x;
        x = x.saturating_add(*w + COLUMN_SPACING);
    }
    app.grid = GridLayout {
        inner,
        offset: state.offset(),
        col_starts,
    };
}

fn table_state(app: &App) -> TableState {
    let mut st = TableState::default().with_offset(app.grid.offset);
    if !app.table.is_empty() {
        st.select(Some(app.sel_row.min(app.table.len() - 1)));
    }
    st
}

fn draw_help(f: &mut Frame, area: Rect) {
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(keys, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": "),
            Span::raw(what),
        ])
    };
    let lines = vec![
        entry("Click / Space", "Select a row."),
        entry("Ctrl+Click / t", "Toggle a row, keep others."),
        entry("Shift+Click / V", "Select rows from the anchor."),
        entry("Shift+Up/Down", "Extend the selection."),
        entry("Double-click / Enter", "Edit a cell."),
        entry("Enter / Tab", "Save the edit. Esc cancels."),
        entry("Ctrl+Z / u", "Undo the last action."),
        entry("Ctrl+X / Ctrl+Y", "Redo the last undone action."),
        entry("a", "Add a row."),
        entry("d / Delete", "Delete selected rows."),
        entry("E", "Export CSV."),
        entry("? / q", "Toggle help / quit."),
    ];
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("How to Use"));
    f.render_widget(p, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let mode = match app.mode {
        AppMode::Normal => "NORMAL",
        AppMode::Editing { .. } => "EDIT",
    };
    let text = Line::from(vec![
        Span::styled(
            format!("[{mode}] "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(&app.status),
        Span::raw(format!(
            " | undo {} / redo {}",
            app.log.undo_len(),
            app.log.redo_len()
        )),
    ]);
    let p = Paragraph::new(text).block(Block::default().borders(Borders::TOP));
    f.render_widget(p, area);
}

/// `#`, Company, Revenue widths for a grid `total_width` columns wide.
pub fn column_widths(total_width: u16) -> [u16; GRID_COLUMNS] {
    let fixed = INDEX_WIDTH + REVENUE_WIDTH + COLUMN_SPACING * (GRID_COLUMNS as u16 - 1);
    let company = total_width.saturating_sub(fixed).max(1);
    [INDEX_WIDTH, company, REVENUE_WIDTH]
}
