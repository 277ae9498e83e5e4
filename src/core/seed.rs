//! Deterministic demo dataset: courses, modules, a semester of lectures,
//! students and their attendance history. This is the bulk-seeding tooling
//! that exercises the full-history streak replay.

use crate::core::streak;
use crate::db::{log, queries};
use crate::errors::AppResult;
use crate::utils::time::fmt_utc;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, params};

const COURSES: &[(&str, &str, &str, &[&str])] = &[
    (
        "COMP1711",
        "Procedural Programming",
        "staff001",
        &["Introduction to Python", "Algorithm Design"],
    ),
    (
        "COMP2211",
        "Operating Systems",
        "staff002",
        &["Process Management", "Memory Systems"],
    ),
];

const STAFF: &[(&str, &str)] = &[("staff001", "dr_smith"), ("staff002", "prof_jones")];

const STUDENT_COUNT: usize = 8;
const PAST_WEEKS: i64 = 6;

/// Populate an empty database. Returns false (and does nothing) when user
/// rows already exist.
pub fn seed(conn: &mut Connection, now: DateTime<Utc>) -> AppResult<bool> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(false);
    }

    let tx = conn.transaction()?;

    for (id, username) in STAFF {
        tx.execute(
            "INSERT INTO users (student_id, username, password, is_staff)
             VALUES (?1, ?2, 'not-a-real-hash', 1)",
            params![id, username],
        )?;
    }

    let students: Vec<String> = (1..=STUDENT_COUNT)
        .map(|i| format!("sc{:04}abc", i))
        .collect();
    for (i, id) in students.iter().enumerate() {
        tx.execute(
            "INSERT INTO users (student_id, username, password, is_staff)
             VALUES (?1, ?2, 'not-a-real-hash', 0)",
            params![id, format!("student{}", i + 1)],
        )?;
    }

    for (code, name, lecturer, modules) in COURSES {
        tx.execute(
            "INSERT INTO courses (code, name) VALUES (?1, ?2)",
            params![code, name],
        )?;

        for module_name in *modules {
            tx.execute(
                "INSERT INTO modules (name, course_code) VALUES (?1, ?2)",
                params![module_name, code],
            )?;
            let module_id = tx.last_insert_rowid();

            // A semester of weekly lectures that already ended...
            for week in 0..PAST_WEEKS {
                let start = now - Duration::weeks(PAST_WEEKS - week) - Duration::hours(1);
                insert_lecture(&tx, module_id, lecturer, start, &students, true)?;
            }

            // ...plus one lecture currently in session.
            let live_start = now - Duration::minutes(15);
            insert_lecture(&tx, module_id, lecturer, live_start, &students, false)?;
        }
    }

    // Counters come from the same replay the repair job uses.
    for id in &students {
        let history: Vec<bool> = queries::enrollment_history(&tx, id, None)?
            .iter()
            .map(|e| e.attended)
            .collect();
        let state = streak::replay(&history);
        queries::set_streaks(&tx, id, state.current, state.longest)?;
    }

    log::record(&tx, "seed", "", "Seeded demo dataset")?;
    tx.commit()?;
    Ok(true)
}

fn insert_lecture(
    conn: &Connection,
    module_id: i64,
    lecturer: &str,
    start: DateTime<Utc>,
    students: &[String],
    in_the_past: bool,
) -> AppResult<()> {
    let end = start + Duration::hours(1);
    conn.execute(
        "INSERT INTO lectures (module_id, lecturer_id, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4)",
        params![module_id, lecturer, fmt_utc(start), fmt_utc(end)],
    )?;
    let lecture_id = conn.last_insert_rowid();

    for (i, student) in students.iter().enumerate() {
        // Fixed pattern, roughly 75% attendance for past lectures.
        let attended = in_the_past && (i as i64 + lecture_id) % 4 != 0;
        conn.execute(
            "INSERT INTO lecture_attendance (user_id, lecture_id, is_attended)
             VALUES (?1, ?2, ?3)",
            params![student, lecture_id, attended as i64],
        )?;
    }
    Ok(())
}
