pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod stats;

use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring a database up to the current schema. All DDL lives in the
/// migration engine; this is the only entry point callers need.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    migrate::run_pending_migrations(conn)
}
