//! Seed rows and CSV export.
//!
//! SQLite sources are opened read-only; edits never go back to the file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OpenFlags, types::ValueRef};
use tracing::info;

use crate::table::{RowContent, Table};

/// Rows shown when no database is given.
pub fn demo_rows() -> Vec<RowContent> {
    vec![
        RowContent::new("Acme Corp", "$1,200,000"),
        RowContent::new("Globex", "$850,000"),
        RowContent::new("Initech", "$430,000"),
        RowContent::new("Umbrella", "$2,100,000"),
        RowContent::new("Hooli", "$3,750,000"),
    ]
}

/// Read `company`/`revenue` from `table`, falling back to its first two
/// columns, in rowid order.
pub fn load_rows(path: &Path, table: &str) -> Result<Vec<RowContent>> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let rows = load_rows_from(&conn, table)?;
    info!(path = %path.display(), table, rows = rows.len(), "loaded seed rows");
    Ok(rows)
}

pub fn load_rows_from(conn: &Connection, table: &str) -> Result<Vec<RowContent>> {
    let mut col_stmt = conn.prepare(&format!("PRAGMA table_info({})", ident(table)))?;
    let mut columns: Vec<String> = Vec::new();
    let mut col_rows = col_stmt.query([])?;
    while let Some(row) = col_rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }
    if columns.is_empty() {
        bail!("table {table:?} not found or has no columns");
    }

    let pick = |wanted: &str, fallback: usize| -> Option<String> {
        columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(wanted))
            .or_else(|| columns.get(fallback))
            .cloned()
    };
    let company = pick("company", 0).context("no company column")?;
    let revenue = match pick("revenue", 1) {
        Some(c) if c != company => c,
        _ => bail!("table {table:?} needs a revenue column"),
    };

    let sql = format!(
        "SELECT {}, {} FROM {} ORDER BY rowid",
        ident(&company),
        ident(&revenue),
        ident(table)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(RowContent::new(
                value_to_string(row.get_ref(0)?),
                value_to_string(row.get_ref(1)?),
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Write the table as CSV with a derived `#` column. Returns the row count.
pub fn export_csv(table: &Table, path: &Path) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_csv_row(&mut w, &["#", "Company", "Revenue"])?;
    for (i, row) in table.iter().enumerate() {
        let index = (i + 1).to_string();
        write_csv_row(&mut w, &[index.as_str(), row.company.as_str(), row.revenue.as_str()])?;
    }
    w.flush()?;
    info!(path = %path.display(), rows = table.len(), "exported csv");
    Ok(table.len())
}

fn write_csv_row<W: Write>(w: &mut W, cols: &[&str]) -> std::io::Result<()> {
    let mut first = true;
    for col in cols {
        if !first {
            w.write_all(b",")?;
        }
        first = false;
        let needs_quotes =
            col.contains(',') || col.contains('"') || col.contains('\n') || col.contains('\r');
        if needs_quotes {
            let escaped = col.replace('"', "\"\"");
            w.write_all(b"\"")?;
            w.write_all(escaped.as_bytes())?;
            w.write_all(b"\"")?;
        } else {
            w.write_all(col.as_bytes())?;
        }
    }
    w.write_all(b"\n")?;
    Ok(())
}

fn value_to_string(v: ValueRef<'_>) -> String {
    match v {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => format!("{}", f),
        ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
        ValueRef::Blob(b) => format!("0x{}", hex(b)),
    }
}

fn hex(data: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut s = String::with_capacity(data.len() * 2);
    for &b in data {
        s.push(HEX[(b >> 4) as usize] as char);
        s.push(HEX[(b & 0xf) as usize] as char);
    }
    s
}

// Quote identifiers with double-quotes, and escape inner quotes
fn ident(name: &str) -> String {
    let escaped = name.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_quotes_commas_and_quotes() {
        let mut out = Vec::new();
        write_csv_row(&mut out, &["1", "Acme, Inc", "say \"hi\""]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1,\"Acme, Inc\",\"say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn ident_escapes_quotes() {
        assert_eq!(ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn values_render_like_the_grid() {
        assert_eq!(value_to_string(ValueRef::Null), "NULL");
        assert_eq!(value_to_string(ValueRef::Integer(42)), "42");
        assert_eq!(value_to_string(ValueRef::Blob(&[0xab, 0x01])), "0xab01");
    }
}
