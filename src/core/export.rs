//! Attendance export to CSV / JSON.

use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::time::fmt_utc;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use csv::Writer;
use rusqlite::{Connection, params};
use serde::Serialize;
use std::path::Path;

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Flat attendance row for export.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub student_id: String,
    pub username: String,
    pub course_code: String,
    pub module_name: String,
    pub lecture_id: i64,
    pub start_time: String,
    pub attended: bool,
}

/// Collect the export rows, optionally restricted to one course.
pub fn collect_rows(
    conn: &Connection,
    course_code: Option<&str>,
) -> AppResult<Vec<AttendanceExport>> {
    if let Some(code) = course_code
        && !queries::course_exists(conn, code)?
    {
        return Err(AppError::UnknownCourse(code.to_string()));
    }

    let mut stmt = conn.prepare_cached(
        "SELECT u.student_id, u.username, m.course_code, m.name, l.id, l.start_time,
                a.is_attended
         FROM lecture_attendance a
         JOIN users u ON u.student_id = a.user_id
         JOIN lectures l ON l.id = a.lecture_id
         JOIN modules m ON m.id = l.module_id
         WHERE (?1 IS NULL OR m.course_code = ?1)
         ORDER BY u.student_id ASC, l.start_time ASC",
    )?;

    let rows = stmt.query_map(params![course_code], |row| {
        Ok(AttendanceExport {
            student_id: row.get(0)?,
            username: row.get(1)?,
            course_code: row.get(2)?,
            module_name: row.get(3)?,
            lecture_id: row.get(4)?,
            start_time: row.get(5)?,
            attended: row.get::<_, i64>(6)? != 0,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn write_csv(path: &str, rows: &[AttendanceExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record([
        "student_id",
        "username",
        "course_code",
        "module_name",
        "lecture_id",
        "start_time",
        "attended",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        wtr.write_record(&[
            row.student_id.clone(),
            row.username.clone(),
            row.course_code.clone(),
            row.module_name.clone(),
            row.lecture_id.to_string(),
            row.start_time.clone(),
            row.attended.to_string(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_json(path: &str, rows: &[AttendanceExport]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(rows).map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Run a full export. Refuses to overwrite unless `force`.
pub fn export(
    conn: &Connection,
    format: &ExportFormat,
    path: &str,
    course_code: Option<&str>,
    force: bool,
    now: DateTime<Utc>,
) -> AppResult<usize> {
    if Path::new(path).exists() && !force {
        return Err(AppError::Export(format!(
            "file already exists: {path} (use --force to overwrite)"
        )));
    }

    let rows = collect_rows(conn, course_code)?;
    match format {
        ExportFormat::Csv => write_csv(path, &rows)?,
        ExportFormat::Json => write_json(path, &rows)?,
    }

    success(format!(
        "{} export completed: {} ({} rows, as of {})",
        format.as_str().to_uppercase(),
        path,
        rows.len(),
        fmt_utc(now)
    ));
    Ok(rows.len())
}
