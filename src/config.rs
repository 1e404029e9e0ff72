use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Revenue table TUI editor")]
pub struct Config {
    /// Optional SQLite database to seed rows from (opened read-only)
    #[arg(value_name = "DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Table to read company/revenue rows from
    #[arg(short = 't', long, default_value = "revenue")]
    pub table: String,

    /// Maximum undo depth (0 = unlimited, the default)
    #[arg(long, default_value_t = 0)]
    pub history_limit: usize,

    /// Where `E` writes the CSV export
    #[arg(short = 'o', long, default_value = "revenue.csv")]
    pub export_path: PathBuf,

    /// Directory for the rolling log file (defaults to <tmp>/revenue-table)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Two clicks on the same cell within this many milliseconds edit it
    #[arg(long, default_value_t = 400)]
    pub double_click_ms: u64,
}

impl Config {
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("revenue-table"))
    }

    pub fn double_click(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::try_parse_from(["revenue-table"]).unwrap();
        assert!(c.db_path.is_none());
        assert_eq!(c.table, "revenue");
        assert_eq!(c.history_limit, 0);
        assert_eq!(c.double_click(), Duration::from_millis(400));
        assert!(c.log_dir().ends_with("revenue-table"));
    }

    #[test]
    fn seed_database_and_limits() {
        let c = Config::try_parse_from([
            "revenue-table",
            "data.db",
            "-t",
            "firms",
            "--history-limit",
            "0",
            "-o",
            "out.csv",
        ])
        .unwrap();
        assert_eq!(c.db_path, Some(PathBuf::from("data.db")));
        assert_eq!(c.table, "firms");
        assert_eq!(c.history_limit, 0);
        assert_eq!(c.export_path, PathBuf::from("out.csv"));
    }
}
