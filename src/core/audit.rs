//! Rendering of the internal audit trail (`log` table): every init, seed,
//! migration, repair and successful attendance submission leaves a row.

use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;

const OP_COLUMN_CAP: usize = 60;

struct LogEntry {
    id: i64,
    date: String,
    operation: String,
    target: String,
    message: String,
}

impl LogEntry {
    /// "operation" or "operation (target)".
    fn op_label(&self) -> String {
        if self.target.is_empty() {
            self.operation.clone()
        } else {
            format!("{} ({})", self.operation, self.target)
        }
    }
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "attend" => Colour::Green,
        "repair" => Colour::Yellow,
        "seed" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Character count as the terminal shows it, with ANSI escapes removed.
fn visible_len(s: &str) -> usize {
    let re = Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static pattern");
    re.replace_all(s, "").chars().count()
}

fn truncate(label: &str, cap: usize) -> String {
    if label.len() <= cap {
        return label.to_string();
    }
    let mut s: String = label.chars().take(cap.saturating_sub(3)).collect();
    s.push_str("...");
    s
}

fn fetch_entries(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn
        .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        let raw_date: String = row.get(1)?;
        Ok(LogEntry {
            id: row.get(0)?,
            date: chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date),
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }
    Ok(entries)
}

pub fn print_log(conn: &Connection) -> AppResult<()> {
    let entries = fetch_entries(conn)?;

    if entries.is_empty() {
        println!("📜 Internal log is empty.");
        return Ok(());
    }

    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
    let op_w = entries
        .iter()
        .map(|e| e.op_label().len())
        .max()
        .unwrap_or(10)
        .min(OP_COLUMN_CAP);

    println!("📜 Internal log:\n");

    for entry in entries {
        let label = truncate(&entry.op_label(), OP_COLUMN_CAP);
        let color = color_for_operation(&entry.operation);

        // Only the operation word is colored; any "(target)" suffix stays plain.
        let painted = match label.split_once(' ') {
            Some((word, rest)) => format!("{} {}", color.paint(word), rest),
            None => color.paint(label.as_str()).to_string(),
        };

        // Pad on visible width; the escapes would otherwise shift the column.
        let pad = " ".repeat(op_w.saturating_sub(visible_len(&painted)));

        println!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            entry.id, entry.date, painted, pad, entry.message,
        );
    }

    Ok(())
}
