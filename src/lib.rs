//! rollcall library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::time::request_now;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    // "now" is sampled once per request and reused for every code-window
    // comparison inside it.
    let now = request_now(cli.at.as_deref())?;

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Code { .. } => cli::commands::code::handle(&cli.command, cfg, now),
        Commands::Attend { .. } => cli::commands::attend::handle(&cli.command, cfg, now),
        Commands::Leaderboard { .. } => {
            cli::commands::leaderboard::handle(&cli.command, cfg, now)
        }
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Repair { .. } => cli::commands::repair::handle(&cli.command, cfg),
        Commands::Seed => cli::commands::seed::handle(cfg, now),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, now),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once
    let mut cfg = Config::load();

    // Apply command-line overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(seed) = &cli.seed {
        cfg.secret_seed = seed.clone();
    }

    dispatch(&cli, &cfg)
}
