//! Verification orchestration: one submitted code, one pass, no persisted
//! intermediate state.
//!
//! The statuses here are request-local outcomes, not errors; only storage
//! or clock failures surface as `AppError`.

use crate::core::{otp, streak};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;

/// Outcome of a verify-and-record request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VerifyStatus {
    /// Submitted code is not exactly 4 ASCII digits. No lookup attempted.
    InvalidFormat,
    /// No lecture is in session at `now`.
    NoActiveLecture,
    /// Code matched no in-session lecture within the tolerance window.
    InvalidOrExpiredCode,
    /// A lecture matched but the student has no enrollment record for it.
    /// Enrollment is owned elsewhere and is never auto-created here.
    NotEnrolled { lecture_id: i64 },
    /// Attendance recorded (or already on record).
    Recorded {
        lecture_id: i64,
        already_attended: bool,
        current_streak: i64,
        longest_streak: i64,
    },
}

/// Verify a submitted code and mark the student attended on the first
/// matching in-session lecture.
///
/// Codes are only 4 digits, so two concurrently active lectures can share a
/// code within a window; first match in lecture-id order wins. That
/// tie-break is deliberate and documented, not a defect.
pub fn verify_and_record(
    conn: &mut Connection,
    seed: &str,
    tolerance: i64,
    student_id: &str,
    submitted_code: &str,
    now: DateTime<Utc>,
) -> AppResult<VerifyStatus> {
    // 1. Format gate, before any storage access.
    if !otp::is_valid_code_format(submitted_code) {
        return Ok(VerifyStatus::InvalidFormat);
    }

    // 2. Resolve the candidate set.
    let candidates = queries::active_lectures(conn, now)?;
    if candidates.is_empty() {
        return Ok(VerifyStatus::NoActiveLecture);
    }

    // 3. First match wins.
    let mut matched = None;
    for lecture in &candidates {
        if otp::verify_code(lecture.id, seed, submitted_code, now, tolerance)? {
            matched = Some(lecture);
            break;
        }
    }
    let Some(lecture) = matched else {
        return Ok(VerifyStatus::InvalidOrExpiredCode);
    };

    // 4-6. Enrollment check, idempotence and the streak update run as one
    // atomic unit. IMMEDIATE takes the write lock up front so a concurrent
    // duplicate submission serializes behind us and re-reads `attended`.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let Some(record) = queries::attendance_record(&tx, student_id, lecture.id)? else {
        return Ok(VerifyStatus::NotEnrolled {
            lecture_id: lecture.id,
        });
    };

    let user = queries::student(&tx, student_id)?
        .ok_or_else(|| AppError::UnknownStudent(student_id.to_string()))?;

    if record.attended {
        // Idempotent success: no streak recomputation.
        return Ok(VerifyStatus::Recorded {
            lecture_id: lecture.id,
            already_attended: true,
            current_streak: user.current_streak,
            longest_streak: user.longest_streak,
        });
    }

    let previous =
        queries::previous_enrolled_lecture(&tx, student_id, lecture.start_time, lecture.id)?;
    let updated = streak::update(
        streak::StreakState {
            current: user.current_streak,
            longest: user.longest_streak,
        },
        previous.map(|p| p.attended),
    );

    queries::set_attended(&tx, student_id, lecture.id)?;
    queries::set_streaks(&tx, student_id, updated.current, updated.longest)?;
    tx.commit()?;

    Ok(VerifyStatus::Recorded {
        lecture_id: lecture.id,
        already_attended: false,
        current_streak: updated.current,
        longest_streak: updated.longest,
    })
}
