use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{backend::CrosstermBackend, prelude::*};
use tracing::{error, info};

use revenue_table::input::InputDispatcher;
use revenue_table::{ActionLog, App, Config, Table, logging, store, ui};

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();

    if let Err(e) = logging::init(&config.log_dir()) {
        eprintln!("Warning: Could not initialize file logging: {e:#}");
    }

    let rows = match &config.db_path {
        Some(path) => store::load_rows(path, &config.table)?,
        None => store::demo_rows(),
    };
    info!(rows = rows.len(), history_limit = config.history_limit, "starting session");

    let mut app = App::new(
        Table::from_contents(rows),
        ActionLog::with_max_depth(config.history_limit),
        config.export_path.clone(),
    );
    let mut dispatcher = InputDispatcher::new(config.double_click());

    let mut terminal = setup_terminal()?;
    let res = run_app(&mut terminal, &mut app, &mut dispatcher);
    restore_terminal(terminal)?;
    if let Err(e) = res {
        error!(error = %e, "event loop failed");
        eprintln!("Error: {e:?}");
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &mut InputDispatcher,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    // Redraw only when state changes
    let mut dirty = true;
    loop {
        if app.should_quit {
            info!("quit requested");
            return Ok(());
        }

        if dirty {
            terminal.draw(|f| ui::draw(f, app))?;
            dirty = false;
        }

        if event::poll(tick_rate)? {
            let ev = event::read()?;
            if matches!(ev, event::Event::Resize(..)) {
                dirty = true;
            }
            // One gesture, one command, handled to completion before the next event
            if let Some(cmd) = dispatcher.dispatch(app, ev, Instant::now()) {
                app.handle(cmd);
                dirty = true;
            }
        }
    }
}
