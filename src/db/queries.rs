//! The storage queries the verification core depends on: active-lecture
//! resolution, attendance lookup, previous-lecture lookback and the streak
//! counter writes.

use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::lecture::Lecture;
use crate::models::student::Student;
use crate::utils::time::{fmt_utc, parse_utc};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// One row of a student's chronological enrollment history.
#[derive(Debug, Clone)]
pub struct EnrollmentEntry {
    pub lecture: Lecture,
    pub module_name: String,
    pub attended: bool,
}

pub fn map_lecture(row: &Row) -> Result<Lecture> {
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    let start_time = parse_utc(&start_str).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(start_str.clone())),
        )
    })?;

    let end_time = parse_utc(&end_str).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(end_str.clone())),
        )
    })?;

    Ok(Lecture {
        id: row.get("id")?,
        module_id: row.get("module_id")?,
        lecturer_id: row.get("lecturer_id")?,
        start_time,
        end_time,
    })
}

/// All lectures in session at `now`, in stable id order.
///
/// The submitted code does not name a lecture, so the verifier iterates
/// this set; id order is the documented first-match-wins tie-break.
pub fn active_lectures(conn: &Connection, now: DateTime<Utc>) -> AppResult<Vec<Lecture>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, module_id, lecturer_id, start_time, end_time
         FROM lectures
         WHERE start_time <= ?1 AND end_time >= ?1
         ORDER BY id ASC",
    )?;

    let now_str = fmt_utc(now);
    let rows = stmt.query_map([now_str], map_lecture)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// In-session lectures of one lecturer, with the module name for display.
pub fn lecturer_active_lectures(
    conn: &Connection,
    lecturer_id: &str,
    now: DateTime<Utc>,
) -> AppResult<Vec<(Lecture, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT l.id, l.module_id, l.lecturer_id, l.start_time, l.end_time, m.name
         FROM lectures l
         JOIN modules m ON m.id = l.module_id
         WHERE l.lecturer_id = ?1 AND l.start_time <= ?2 AND l.end_time >= ?2
         ORDER BY l.id ASC",
    )?;

    let rows = stmt.query_map(params![lecturer_id, fmt_utc(now)], |row| {
        Ok((map_lecture(row)?, row.get::<_, String>(5)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The enrollment record for (student, lecture), if the student is enrolled.
pub fn attendance_record(
    conn: &Connection,
    student_id: &str,
    lecture_id: i64,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT user_id, lecture_id, is_attended
         FROM lecture_attendance
         WHERE user_id = ?1 AND lecture_id = ?2",
    )?;

    let record = stmt
        .query_row(params![student_id, lecture_id], map_attendance)
        .optional()?;
    Ok(record)
}

/// The student's most recent enrolled lecture strictly before the given one
/// in canonical (start_time, id) order - the single-record lookback the
/// streak rule feeds on. The id tie-break keeps this lookback in lockstep
/// with `enrollment_history`, so incremental updates and full replay agree
/// even when two lectures share a start time.
pub fn previous_enrolled_lecture(
    conn: &Connection,
    student_id: &str,
    before_start: DateTime<Utc>,
    before_id: i64,
) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT a.user_id, a.lecture_id, a.is_attended
         FROM lecture_attendance a
         JOIN lectures l ON l.id = a.lecture_id
         WHERE a.user_id = ?1
           AND (l.start_time < ?2 OR (l.start_time = ?2 AND l.id < ?3))
         ORDER BY l.start_time DESC, l.id DESC
         LIMIT 1",
    )?;

    let record = stmt
        .query_row(
            params![student_id, fmt_utc(before_start), before_id],
            map_attendance,
        )
        .optional()?;
    Ok(record)
}

fn map_attendance(row: &Row) -> Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        student_id: row.get(0)?,
        lecture_id: row.get(1)?,
        attended: row.get::<_, i64>(2)? != 0,
    })
}

pub fn student(conn: &Connection, student_id: &str) -> AppResult<Option<Student>> {
    let mut stmt = conn.prepare_cached(
        "SELECT student_id, username, is_staff, current_streak, longest_streak
         FROM users WHERE student_id = ?1",
    )?;

    let row = stmt
        .query_row([student_id], |row| {
            Ok(Student {
                student_id: row.get(0)?,
                username: row.get(1)?,
                is_staff: row.get::<_, i64>(2)? != 0,
                current_streak: row.get(3)?,
                longest_streak: row.get(4)?,
            })
        })
        .optional()?;
    Ok(row)
}

/// Flip the attendance flag to true. Never flips it back.
pub fn set_attended(conn: &Connection, student_id: &str, lecture_id: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE lecture_attendance SET is_attended = 1
         WHERE user_id = ?1 AND lecture_id = ?2",
        params![student_id, lecture_id],
    )?;
    Ok(())
}

/// Persist recomputed streak counters for a student.
pub fn set_streaks(
    conn: &Connection,
    student_id: &str,
    current: i64,
    longest: i64,
) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET current_streak = ?2, longest_streak = ?3
         WHERE student_id = ?1",
        params![student_id, current, longest],
    )?;
    Ok(())
}

/// A student's full enrollment history in start-time order, optionally
/// restricted to one course. Used by `list`, `repair` and streak replay.
pub fn enrollment_history(
    conn: &Connection,
    student_id: &str,
    course_code: Option<&str>,
) -> AppResult<Vec<EnrollmentEntry>> {
    let sql = "SELECT l.id, l.module_id, l.lecturer_id, l.start_time, l.end_time,
                      m.name, a.is_attended
               FROM lecture_attendance a
               JOIN lectures l ON l.id = a.lecture_id
               JOIN modules m ON m.id = l.module_id
               WHERE a.user_id = ?1
                 AND (?2 IS NULL OR m.course_code = ?2)
               ORDER BY l.start_time ASC, l.id ASC";
    let mut stmt = conn.prepare_cached(sql)?;

    let rows = stmt.query_map(params![student_id, course_code], |row| {
        Ok(EnrollmentEntry {
            lecture: map_lecture(row)?,
            module_name: row.get(5)?,
            attended: row.get::<_, i64>(6)? != 0,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn course_exists(conn: &Connection, code: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM courses WHERE code = ?1")?;
    Ok(stmt.exists([code])?)
}

/// All student ids (staff excluded), for bulk maintenance.
pub fn student_ids(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT student_id FROM users WHERE is_staff = 0 ORDER BY student_id")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Lectures of a course that already ended before `now`.
pub fn total_past_lectures(
    conn: &Connection,
    course_code: &str,
    now: DateTime<Utc>,
) -> AppResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*)
         FROM lectures l
         JOIN modules m ON m.id = l.module_id
         WHERE m.course_code = ?1 AND l.end_time < ?2",
        params![course_code, fmt_utc(now)],
        |row| row.get(0),
    )?;
    Ok(count)
}
