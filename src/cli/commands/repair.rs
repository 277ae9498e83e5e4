use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::repair;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Repair { student } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match student {
            Some(id) => {
                if repair::repair_student(&pool.conn, id)? {
                    success(format!("Streak counters repaired for {}", id));
                    log::record(&pool.conn, "repair", id, "Streak counters recomputed")?;
                } else {
                    info(format!("Streak counters for {} already consistent", id));
                }
            }
            None => {
                let summary = repair::repair_all(&pool.conn)?;
                success(format!(
                    "Checked {} students, repaired {}",
                    summary.checked, summary.repaired
                ));
                log::record(
                    &pool.conn,
                    "repair",
                    "all",
                    &format!(
                        "Checked {} students, repaired {}",
                        summary.checked, summary.repaired
                    ),
                )?;
            }
        }
    }

    Ok(())
}
