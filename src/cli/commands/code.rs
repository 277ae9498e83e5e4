use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::codes;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::time::fmt_utc;
use chrono::{DateTime, Utc};

/// Show the rotating code for each of the lecturer's in-session lectures.
pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::Code { lecturer } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let lecture_codes = codes::current_codes(&pool.conn, &cfg.secret_seed, lecturer, now)?;

        if lecture_codes.is_empty() {
            info(format!("No lecture in session for {} right now.", lecturer));
            return Ok(());
        }

        for lc in lecture_codes {
            println!(
                "📣 Lecture {} ({}) · {} → {}",
                lc.lecture_id,
                lc.module_name,
                fmt_utc(lc.start_time),
                fmt_utc(lc.end_time),
            );
            println!("   Code: {}  (rotates every 30 s)", lc.code);
        }
    }

    Ok(())
}
