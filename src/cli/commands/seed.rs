use crate::config::Config;
use crate::core::seed;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use chrono::{DateTime, Utc};

pub fn handle(cfg: &Config, now: DateTime<Utc>) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    if seed::seed(&mut pool.conn, now)? {
        success("Database populated with demo data");
    } else {
        warning("Database already contains users; nothing seeded");
    }

    Ok(())
}
