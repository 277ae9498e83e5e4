use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::verify::{VerifyStatus, verify_and_record};
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, success};
use chrono::{DateTime, Utc};

/// Submit a code as a student. Domain outcomes (bad code, not enrolled, …)
/// are printed, not raised; only infrastructure failures exit non-zero.
pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::Attend { student, code } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let status = verify_and_record(
            &mut pool.conn,
            &cfg.secret_seed,
            cfg.tolerance,
            student,
            code,
            now,
        )?;

        match status {
            VerifyStatus::InvalidFormat => {
                error("Invalid code format. Codes are exactly 4 digits.");
            }
            VerifyStatus::NoActiveLecture => {
                error("No lecture is in session right now.");
            }
            VerifyStatus::InvalidOrExpiredCode => {
                error("Invalid or expired code.");
            }
            VerifyStatus::NotEnrolled { lecture_id } => {
                error(format!(
                    "{} is not enrolled in lecture {}.",
                    student, lecture_id
                ));
            }
            VerifyStatus::Recorded {
                lecture_id,
                already_attended: true,
                current_streak,
                longest_streak,
            } => {
                success(format!(
                    "Attendance already marked for lecture {} (streak {}, best {}).",
                    lecture_id, current_streak, longest_streak
                ));
            }
            VerifyStatus::Recorded {
                lecture_id,
                already_attended: false,
                current_streak,
                longest_streak,
            } => {
                success(format!(
                    "Attendance marked for lecture {}! 🔥 Streak: {} (best {}).",
                    lecture_id, current_streak, longest_streak
                ));

                if let Err(e) = log::record(
                    &pool.conn,
                    "attend",
                    student,
                    &format!("Attendance marked for lecture {}", lecture_id),
                ) {
                    eprintln!("⚠️ Failed to write internal log: {}", e);
                }
            }
        }
    }

    Ok(())
}
