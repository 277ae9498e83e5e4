use predicates::str::contains;

mod common;
use common::{init_seeded, rollcall, setup_test_db};

fn streaks(db_path: &str, student: &str) -> (i64, i64) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT current_streak, longest_streak FROM users WHERE student_id = ?1",
        [student],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .expect("streaks")
}

#[test]
fn repair_restores_drifted_counters() {
    let db_path = setup_test_db("repair_drift");
    init_seeded(&db_path);

    let before = streaks(&db_path, "sc0002abc");

    // Simulate out-of-order mutation by another process.
    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    conn.execute(
        "UPDATE users SET current_streak = 99, longest_streak = 99
         WHERE student_id = 'sc0002abc'",
        [],
    )
    .expect("corrupt");
    drop(conn);

    rollcall()
        .args(["--db", &db_path, "--test", "repair", "--student", "sc0002abc"])
        .assert()
        .success()
        .stdout(contains("repaired"));

    assert_eq!(streaks(&db_path, "sc0002abc"), before);
}

#[test]
fn repair_is_a_noop_on_consistent_data() {
    let db_path = setup_test_db("repair_noop");
    init_seeded(&db_path);

    rollcall()
        .args(["--db", &db_path, "--test", "repair", "--student", "sc0002abc"])
        .assert()
        .success()
        .stdout(contains("already consistent"));
}

#[test]
fn repair_all_checks_every_student() {
    let db_path = setup_test_db("repair_all");
    init_seeded(&db_path);

    rollcall()
        .args(["--db", &db_path, "--test", "repair"])
        .assert()
        .success()
        .stdout(contains("Checked 8 students, repaired 0"));
}

#[test]
fn unknown_student_fails() {
    let db_path = setup_test_db("repair_unknown");
    init_seeded(&db_path);

    rollcall()
        .args(["--db", &db_path, "--test", "repair", "--student", "zz9999zzz"])
        .assert()
        .failure()
        .stderr(contains("Unknown student"));
}
