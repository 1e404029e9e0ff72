//! Maps terminal events to [`Command`]s.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, AppMode};
use crate::command::{Command, Direction};
use crate::selection::ClickModifiers;
use crate::table::Field;

/// Turns raw events into commands. Keeps the last click to detect
/// double-clicks, which the terminal does not report on its own.
pub struct InputDispatcher {
    double_click: Duration,
    last_click: Option<(Instant, usize, usize)>,
}

impl InputDispatcher {
    pub fn new(double_click: Duration) -> Self {
        Self {
            double_click,
            last_click: None,
        }
    }

    pub fn dispatch(&mut self, app: &App, event: Event, now: Instant) -> Option<Command> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => command_for_key(app, key),
            Event::Mouse(mouse) => self.command_for_mouse(app, mouse, now),
            Event::Paste(text) if app.is_editing() => Some(Command::EditInsertStr(text)),
            _ => None,
        }
    }

    pub fn command_for_mouse(
        &mut self,
        app: &App,
        mouse: MouseEvent,
        now: Instant,
    ) -> Option<Command> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return match mouse.kind {
                MouseEventKind::ScrollUp if !app.is_editing() => {
                    Some(Command::MoveCursor(Direction::Up))
                }
                MouseEventKind::ScrollDown if !app.is_editing() => {
                    Some(Command::MoveCursor(Direction::Down))
                }
                _ => None,
            };
        }

        let Some((row, col)) = app.grid.hit(mouse.column, mouse.row, app.table.len()) else {
            self.last_click = None;
            // Clicking outside the grid takes focus away from the edited cell.
            return app.is_editing().then_some(Command::CommitEdit);
        };

        let is_double = self.last_click.is_some_and(|(at, r, c)| {
            r == row && c == col && now.saturating_duration_since(at) <= self.double_click
        });
        if is_double {
            self.last_click = None;
            // Double-click on the derived `#` column edits nothing.
            return Field::from_column(col).map(|field| Command::BeginEdit { row, field });
        }
        self.last_click = Some((now, row, col));

        // The edited cell keeps focus when clicked again.
        if let Some(pending) = &app.pending_edit
            && app.table.id_at(row) == Some(pending.cell.row)
            && Field::from_column(col) == Some(pending.cell.field)
        {
            return None;
        }

        let modifiers = ClickModifiers {
            additive: mouse
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER),
            range: mouse.modifiers.contains(KeyModifiers::SHIFT),
        };
        Some(Command::Select { row, modifiers })
    }
}

pub fn command_for_key(app: &App, key: KeyEvent) -> Option<Command> {
    match app.mode {
        AppMode::Normal => command_for_key_normal(app, key),
        AppMode::Editing { .. } => command_for_key_editing(key),
    }
}

fn command_for_key_normal(app: &App, key: KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        return match key.code {
            KeyCode::Char('z') => Some(Command::Undo),
            KeyCode::Char('x') | KeyCode::Char('y') => Some(Command::Redo),
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char(' ') => Some(select_cursor_row(app, ClickModifiers::ADDITIVE)),
            _ => None,
        };
    }

    let cmd = match key.code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('?') => Command::ToggleHelp,
        KeyCode::Up if shift => Command::ExtendSelection(Direction::Up),
        KeyCode::Down if shift => Command::ExtendSelection(Direction::Down),
        KeyCode::Up | KeyCode::Char('k') => Command::MoveCursor(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Command::MoveCursor(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            Command::MoveCursor(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            Command::MoveCursor(Direction::Right)
        }
        KeyCode::Char(' ') => select_cursor_row(app, ClickModifiers::NONE),
        KeyCode::Char('t') => select_cursor_row(app, ClickModifiers::ADDITIVE),
        KeyCode::Char('V') => select_cursor_row(app, ClickModifiers::RANGE),
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::F(2) => {
            let cell = app.cursor_cell()?;
            Command::BeginEdit {
                row: app.sel_row,
                field: cell.field,
            }
        }
        KeyCode::Char('a') | KeyCode::Insert => Command::AddRow,
        KeyCode::Char('d') | KeyCode::Delete => Command::DeleteSelected,
        KeyCode::Char('u') => Command::Undo,
        KeyCode::Char('E') => Command::ExportCsv,
        _ => return None,
    };
    Some(cmd)
}

fn select_cursor_row(app: &App, modifiers: ClickModifiers) -> Command {
    Command::Select {
        row: app.sel_row,
        modifiers,
    }
}

fn command_for_key_editing(key: KeyEvent) -> Option<Command> {
    let cmd = match key.code {
        KeyCode::Enter | KeyCode::Tab => Command::CommitEdit,
        KeyCode::Esc => Command::CancelEdit,
        KeyCode::Backspace => Command::EditBackspace,
        KeyCode::Delete => Command::EditDelete,
        KeyCode::Left => Command::EditLeft,
        KeyCode::Right => Command::EditRight,
        KeyCode::Home => Command::EditHome,
        KeyCode::End => Command::EditEnd,
        // Undo/redo/quit run after the edit is committed; other control chars are ignored.
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return match c {
                'z' => Some(Command::Undo),
                'x' | 'y' => Some(Command::Redo),
                'c' => Some(Command::Quit),
                _ => None,
            };
        }
        KeyCode::Char(c) => Command::EditInsert(c),
        _ => return None,
    };
    Some(cmd)
}
