use predicates::str::contains;

mod common;
use common::{FROZEN_NOW, TEST_SEED, code_for, init_seeded, live_lecture_ids, rollcall, setup_test_db, unmatched_code};

#[test]
fn attend_marks_attendance_and_reports_streak() {
    let db_path = setup_test_db("attend_marks");
    init_seeded(&db_path);

    // The lowest live lecture id wins any first-match tie, so its code is
    // guaranteed to land on it.
    let lecture_id = live_lecture_ids(&db_path)[0];
    let code = code_for(lecture_id);

    rollcall()
        .args([
            "--db", &db_path, "--test", "--seed", TEST_SEED, "--at", FROZEN_NOW,
            "attend", "--student", "sc0001abc", "--code", &code,
        ])
        .assert()
        .success()
        .stdout(contains(format!("Attendance marked for lecture {}", lecture_id)))
        .stdout(contains("Streak: 2"));
}

#[test]
fn second_submission_is_idempotent() {
    let db_path = setup_test_db("attend_idempotent");
    init_seeded(&db_path);

    let lecture_id = live_lecture_ids(&db_path)[0];
    let code = code_for(lecture_id);
    let args = [
        "--db", &db_path, "--test", "--seed", TEST_SEED, "--at", FROZEN_NOW,
        "attend", "--student", "sc0001abc", "--code", &code,
    ];

    rollcall()
        .args(args)
        .assert()
        .success()
        .stdout(contains("Attendance marked for lecture"));

    rollcall()
        .args(args)
        .assert()
        .success()
        .stdout(contains("Attendance already marked"))
        .stdout(contains("streak 2"));
}

#[test]
fn malformed_code_is_rejected_before_lookup() {
    let db_path = setup_test_db("attend_format");
    init_seeded(&db_path);

    for bad in ["12a4", "7", "12345", ""] {
        rollcall()
            .args([
                "--db", &db_path, "--test", "--seed", TEST_SEED, "--at", FROZEN_NOW,
                "attend", "--student", "sc0001abc", "--code", bad,
            ])
            .assert()
            .success()
            .stderr(contains("Invalid code format"));
    }
}

#[test]
fn unmatched_code_is_invalid_or_expired() {
    let db_path = setup_test_db("attend_wrong_code");
    init_seeded(&db_path);

    let code = unmatched_code(&db_path);
    rollcall()
        .args([
            "--db", &db_path, "--test", "--seed", TEST_SEED, "--at", FROZEN_NOW,
            "attend", "--student", "sc0001abc", "--code", &code,
        ])
        .assert()
        .success()
        .stderr(contains("Invalid or expired code"));
}

#[test]
fn no_lecture_in_session_outside_teaching_hours() {
    let db_path = setup_test_db("attend_no_active");
    init_seeded(&db_path);

    rollcall()
        .args([
            "--db", &db_path, "--test", "--seed", TEST_SEED,
            "--at", "2025-07-01T10:00:00Z",
            "attend", "--student", "sc0001abc", "--code", "1234",
        ])
        .assert()
        .success()
        .stderr(contains("No lecture is in session"));
}

#[test]
fn unenrolled_student_is_not_auto_enrolled() {
    let db_path = setup_test_db("attend_not_enrolled");
    init_seeded(&db_path);

    let lecture_id = live_lecture_ids(&db_path)[0];
    let code = code_for(lecture_id);

    rollcall()
        .args([
            "--db", &db_path, "--test", "--seed", TEST_SEED, "--at", FROZEN_NOW,
            "attend", "--student", "zz9999zzz", "--code", &code,
        ])
        .assert()
        .success()
        .stderr(contains("not enrolled"));

    // No enrollment row was created behind the student's back.
    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM lecture_attendance WHERE user_id = 'zz9999zzz'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn code_command_shows_the_accepted_code() {
    let db_path = setup_test_db("code_shows");
    init_seeded(&db_path);

    let lecture_id = live_lecture_ids(&db_path)[0];
    let code = code_for(lecture_id);

    rollcall()
        .args([
            "--db", &db_path, "--test", "--seed", TEST_SEED, "--at", FROZEN_NOW,
            "code", "--lecturer", "staff001",
        ])
        .assert()
        .success()
        .stdout(contains(format!("Lecture {}", lecture_id)))
        .stdout(contains(code));
}

#[test]
fn code_command_without_live_lecture() {
    let db_path = setup_test_db("code_none");
    init_seeded(&db_path);

    rollcall()
        .args([
            "--db", &db_path, "--test", "--seed", TEST_SEED,
            "--at", "2025-07-01T10:00:00Z",
            "code", "--lecturer", "staff001",
        ])
        .assert()
        .success()
        .stdout(contains("No lecture in session"));
}
