use predicates::str::contains;
use std::fs;

mod common;
use common::{init_seeded, rollcall, setup_test_db, temp_out};

#[test]
fn export_attendance_to_csv() {
    let db_path = setup_test_db("export_csv");
    init_seeded(&db_path);
    let out = temp_out("export_csv", "csv");

    rollcall()
        .args([
            "--db", &db_path, "--test",
            "export", "--format", "csv", "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read export");
    assert!(content.starts_with("student_id,username,course_code"));
    assert!(content.contains("sc0001abc"));
    assert!(content.contains("Algorithm Design"));
}

#[test]
fn export_attendance_to_json() {
    let db_path = setup_test_db("export_json");
    init_seeded(&db_path);
    let out = temp_out("export_json", "json");

    rollcall()
        .args([
            "--db", &db_path, "--test",
            "export", "--format", "json", "--file", &out,
            "--course", "COMP1711",
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let content = fs::read_to_string(&out).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r["course_code"] == "COMP1711"));
}

#[test]
fn export_refuses_to_overwrite_without_force() {
    let db_path = setup_test_db("export_force");
    init_seeded(&db_path);
    let out = temp_out("export_force", "csv");
    fs::write(&out, "occupied").expect("pre-create");

    rollcall()
        .args([
            "--db", &db_path, "--test",
            "export", "--format", "csv", "--file", &out,
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    rollcall()
        .args([
            "--db", &db_path, "--test",
            "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();
}

#[test]
fn audit_log_records_lifecycle_operations() {
    let db_path = setup_test_db("audit_log");
    init_seeded(&db_path);

    rollcall()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Database initialized"))
        .stdout(contains("Seeded demo dataset"));
}

#[test]
fn db_info_and_integrity_check() {
    let db_path = setup_test_db("db_info");
    init_seeded(&db_path);

    rollcall()
        .args(["--db", &db_path, "--test", "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Students:"))
        .stdout(contains("Integrity check passed"));
}
