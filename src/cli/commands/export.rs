use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::{DateTime, Utc};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        course,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        export::export(&pool.conn, format, file, course.as_deref(), *force, now)?;
    }

    Ok(())
}
