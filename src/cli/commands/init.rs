use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::{init_db, log};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Create the config directory, write the configuration file (skipped in
/// test mode), create the database and bring its schema up to date.
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let mut cfg = Config::load();
    if let Some(custom) = &cli.db {
        cfg.database = custom.clone();
    }

    println!("⚙️  Initializing rollcall…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", cfg.database);

    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;

    println!("✅ Database initialized at {}", cfg.database);

    // Audit entry is best-effort; a failed write must not fail init.
    if let Err(e) = log::record(
        &conn,
        "init",
        "",
        &format!("Database initialized at {}", cfg.database),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 rollcall initialization completed!");
    Ok(())
}
