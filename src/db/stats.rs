use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let students: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users WHERE is_staff = 0", [], |row| {
            row.get(0)
        })?;
    let lectures: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM lectures", [], |row| row.get(0))?;
    let enrollments: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM lecture_attendance", [], |row| {
            row.get(0)
        })?;
    let attended: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM lecture_attendance WHERE is_attended = 1",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Students:{} {}{}{}", CYAN, RESET, GREEN, students, RESET);
    println!("{}• Lectures:{} {}{}{}", CYAN, RESET, GREEN, lectures, RESET);
    println!(
        "{}• Enrollments:{} {}{}{}",
        CYAN, RESET, GREEN, enrollments, RESET
    );

    if enrollments > 0 {
        let rate = (attended as f64) * 100.0 / (enrollments as f64);
        println!("{}• Attendance rate:{} {:.1}%", CYAN, RESET, rate);
    }

    //
    // 3) LECTURE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_time FROM lectures ORDER BY start_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_time FROM lectures ORDER BY start_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Lecture range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
