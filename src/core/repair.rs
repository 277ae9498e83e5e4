//! Streak reconciliation: replay each student's full chronological history
//! and rewrite the counters. Maintenance operation, not part of the hot
//! path; used to repair drift when records were mutated out of order.

use crate::core::streak;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

#[derive(Debug, Default)]
pub struct RepairSummary {
    pub checked: usize,
    pub repaired: usize,
}

/// Recompute one student's counters from scratch. Returns true if the
/// stored counters had drifted and were rewritten.
pub fn repair_student(conn: &Connection, student_id: &str) -> AppResult<bool> {
    let user = queries::student(conn, student_id)?
        .ok_or_else(|| AppError::UnknownStudent(student_id.to_string()))?;

    let history: Vec<bool> = queries::enrollment_history(conn, student_id, None)?
        .iter()
        .map(|e| e.attended)
        .collect();

    let replayed = streak::replay(&history);
    if replayed.current == user.current_streak && replayed.longest == user.longest_streak {
        return Ok(false);
    }

    queries::set_streaks(conn, student_id, replayed.current, replayed.longest)?;
    Ok(true)
}

/// Repair every student.
pub fn repair_all(conn: &Connection) -> AppResult<RepairSummary> {
    let mut summary = RepairSummary::default();
    for id in queries::student_ids(conn)? {
        summary.checked += 1;
        if repair_student(conn, &id)? {
            summary.repaired += 1;
        }
    }
    Ok(summary)
}
