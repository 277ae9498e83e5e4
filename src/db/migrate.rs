use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use rusqlite::{Connection, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    stmt.exists([name])
}

/// Check if a table has a given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the base schema: users, courses, modules, lectures and the
/// per-(student, lecture) attendance table.
fn create_base_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            student_id     TEXT PRIMARY KEY,
            username       TEXT NOT NULL,
            password       TEXT NOT NULL DEFAULT '',
            is_staff       INTEGER NOT NULL DEFAULT 0,
            current_streak INTEGER NOT NULL DEFAULT 0,
            longest_streak INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS courses (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS modules (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            course_code TEXT NOT NULL REFERENCES courses(code)
        );

        CREATE TABLE IF NOT EXISTS lectures (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            module_id   INTEGER NOT NULL REFERENCES modules(id),
            lecturer_id TEXT NOT NULL DEFAULT '',
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            CHECK (start_time < end_time)
        );

        CREATE TABLE IF NOT EXISTS lecture_attendance (
            user_id     TEXT NOT NULL REFERENCES users(student_id),
            lecture_id  INTEGER NOT NULL REFERENCES lectures(id),
            is_attended INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (user_id, lecture_id)
        );

        CREATE INDEX IF NOT EXISTS idx_lectures_window ON lectures(start_time, end_time);
        CREATE INDEX IF NOT EXISTS idx_lectures_lecturer ON lectures(lecturer_id);
        CREATE INDEX IF NOT EXISTS idx_attendance_user ON lecture_attendance(user_id);
        "#,
    )?;
    Ok(())
}

/// Add the streak counters to an existing `users` table.
/// Safe to run multiple times; older databases predate these columns.
fn migrate_add_streak_columns(conn: &Connection) -> AppResult<bool> {
    if !table_exists(conn, "users")? {
        return Ok(false); // base schema will create them directly
    }

    let mut applied = false;
    for column in ["current_streak", "longest_streak"] {
        if !has_column(conn, "users", column)? {
            warning(format!("Adding '{column}' column to users table..."));
            conn.execute_batch(&format!(
                "ALTER TABLE users ADD COLUMN {column} INTEGER NOT NULL DEFAULT 0;"
            ))?;
            applied = true;
        }
    }
    Ok(applied)
}

/// Run all pending migrations in order. Idempotent.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let streaks_added = migrate_add_streak_columns(conn)?;

    create_base_schema(conn)?;

    if streaks_added {
        log::record(
            conn,
            "migration_applied",
            "users",
            "Added streak counter columns",
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        for table in ["users", "courses", "modules", "lectures", "lecture_attendance", "log"] {
            assert!(table_exists(&conn, table).unwrap(), "{table} missing");
        }
    }

    #[test]
    fn streak_columns_added_to_legacy_users_table() {
        let conn = Connection::open_in_memory().unwrap();
        // Schema as it looked before streak tracking existed.
        conn.execute_batch(
            "CREATE TABLE users (
                student_id TEXT PRIMARY KEY,
                username   TEXT NOT NULL,
                password   TEXT NOT NULL DEFAULT '',
                is_staff   INTEGER NOT NULL DEFAULT 0
            );
            INSERT INTO users (student_id, username) VALUES ('sc0001abc', 'student1');",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        assert!(has_column(&conn, "users", "current_streak").unwrap());
        assert!(has_column(&conn, "users", "longest_streak").unwrap());

        let (cur, long): (i64, i64) = conn
            .query_row(
                "SELECT current_streak, longest_streak FROM users WHERE student_id='sc0001abc'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!((cur, long), (0, 0));
    }
}
