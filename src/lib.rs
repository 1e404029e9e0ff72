//! Terminal table editor with row selection and linear undo/redo.
//!
//! Every gesture becomes a [`Command`] handled synchronously by [`App`].
//! Mutations go through [`RowMutator`], which records an [`Action`] in the
//! session's [`ActionLog`].

pub mod app;
pub mod command;
pub mod config;
pub mod history;
pub mod input;
pub mod logging;
pub mod mutator;
pub mod selection;
pub mod store;
pub mod table;
pub mod ui;

pub use app::App;
pub use command::Command;
pub use config::Config;
pub use history::{Action, ActionLog, ReplayError};
pub use mutator::RowMutator;
pub use selection::{ClickModifiers, Selection};
pub use table::{CellRef, Field, Row, RowContent, RowId, Table};
