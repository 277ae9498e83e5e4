#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rollcall::core::otp;
use rollcall::utils::time::parse_utc;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Seed used by every integration test so code streams are reproducible.
pub const TEST_SEED: &str = "integration-seed";

/// All integration tests pin the request clock to this instant.
pub const FROZEN_NOW: &str = "2025-03-10T10:00:00Z";

pub fn rollcall() -> Command {
    cargo_bin_cmd!("rollcall")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rollcall.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema and load the deterministic demo dataset.
pub fn init_seeded(db_path: &str) {
    rollcall()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rollcall()
        .args(["--db", db_path, "--test", "--at", FROZEN_NOW, "seed"])
        .assert()
        .success();
}

/// Lecture ids in session at the frozen instant, lowest id first.
pub fn live_lecture_ids(db_path: &str) -> Vec<i64> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare(
            "SELECT id FROM lectures
             WHERE start_time <= ?1 AND end_time >= ?1
             ORDER BY id ASC",
        )
        .expect("prepare");
    let ids = stmt
        .query_map([FROZEN_NOW], |row| row.get::<_, i64>(0))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect();
    ids
}

/// The code the binary would accept for `lecture_id` at the frozen instant.
pub fn code_for(lecture_id: i64) -> String {
    let now = parse_utc(FROZEN_NOW).expect("frozen now");
    otp::current_code(lecture_id, TEST_SEED, now).expect("code")
}

/// A well-formed 4-digit code no in-session lecture accepts at the frozen
/// instant (tolerance 1 on every candidate).
pub fn unmatched_code(db_path: &str) -> String {
    let now = parse_utc(FROZEN_NOW).expect("frozen now");
    let live = live_lecture_ids(db_path);

    for candidate in 0..10_000u32 {
        let code = format!("{:04}", candidate);
        let accepted = live.iter().any(|&id| {
            otp::verify_code(id, TEST_SEED, &code, now, 1).expect("verify")
        });
        if !accepted {
            return code;
        }
    }
    unreachable!("all 10000 codes accepted by some live lecture");
}
