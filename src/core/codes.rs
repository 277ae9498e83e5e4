//! Current-code generation for a lecturer's in-session lectures.

use crate::core::otp;
use crate::db::queries;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;

/// One in-session lecture with its current rotating code.
#[derive(Debug, Clone, Serialize)]
pub struct LectureCode {
    pub lecture_id: i64,
    pub module_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub code: String,
}

/// Codes for every lecture of `lecturer_id` in session at `now`.
/// Empty when the lecturer has no lecture running.
pub fn current_codes(
    conn: &Connection,
    seed: &str,
    lecturer_id: &str,
    now: DateTime<Utc>,
) -> AppResult<Vec<LectureCode>> {
    let lectures = queries::lecturer_active_lectures(conn, lecturer_id, now)?;

    let mut out = Vec::with_capacity(lectures.len());
    for (lecture, module_name) in lectures {
        out.push(LectureCode {
            lecture_id: lecture.id,
            module_name,
            start_time: lecture.start_time,
            end_time: lecture.end_time,
            code: otp::current_code(lecture.id, seed, now)?,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use chrono::TimeZone;

    #[test]
    fn only_in_session_lectures_of_the_lecturer() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO courses (code, name) VALUES ('COMP1711', 'Procedural Programming');
             INSERT INTO modules (id, name, course_code) VALUES (1, 'Algorithm Design', 'COMP1711');
             INSERT INTO lectures (id, module_id, lecturer_id, start_time, end_time) VALUES
                 (1, 1, 'staff001', '2025-03-10T09:30:00Z', '2025-03-10T10:30:00Z'),
                 (2, 1, 'staff002', '2025-03-10T09:30:00Z', '2025-03-10T10:30:00Z'),
                 (3, 1, 'staff001', '2025-03-10T11:00:00Z', '2025-03-10T12:00:00Z');",
        )
        .unwrap();

        let now = Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        let codes = current_codes(&conn, "seed", "staff001", now).unwrap();

        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].lecture_id, 1);
        assert_eq!(codes[0].module_name, "Algorithm Design");
        assert_eq!(codes[0].code.len(), 4);
    }
}
