//! Per-course attendance leaderboard. Read-only aggregation: no writes, no
//! state machine.

use crate::db::queries;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub student_id: String,
    pub username: String,
    pub attended_count: i64,
    pub current_streak: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub course_code: String,
    pub total_past_lectures: i64,
    pub rows: Vec<LeaderboardRow>,
}

/// Build the ranking for one course: staff excluded, ordered by current
/// streak descending with a stable student-id tie-break.
pub fn leaderboard(
    conn: &Connection,
    course_code: &str,
    now: DateTime<Utc>,
) -> AppResult<Leaderboard> {
    if !queries::course_exists(conn, course_code)? {
        return Err(AppError::UnknownCourse(course_code.to_string()));
    }

    let total_past_lectures = queries::total_past_lectures(conn, course_code, now)?;

    let mut stmt = conn.prepare_cached(
        "SELECT u.student_id, u.username, u.current_streak,
                COALESCE(SUM(a.is_attended), 0)
         FROM users u
         JOIN lecture_attendance a ON a.user_id = u.student_id
         JOIN lectures l ON l.id = a.lecture_id
         JOIN modules m ON m.id = l.module_id
         WHERE m.course_code = ?1 AND u.is_staff = 0
         GROUP BY u.student_id, u.username, u.current_streak
         ORDER BY u.current_streak DESC, u.student_id ASC",
    )?;

    let mapped = stmt.query_map([course_code], |row| {
        Ok(LeaderboardRow {
            student_id: row.get(0)?,
            username: row.get(1)?,
            current_streak: row.get(2)?,
            attended_count: row.get(3)?,
        })
    })?;

    let mut rows = Vec::new();
    for r in mapped {
        rows.push(r?);
    }

    Ok(Leaderboard {
        course_code: course_code.to_string(),
        total_past_lectures,
        rows,
    })
}
