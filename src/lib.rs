//! account-session library root.
//! Exposes the CLI parser, the high-level run() function and the session modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Run => cli::commands::run::handle(cfg),
        cmd @ Commands::Config { .. } => cli::commands::config::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1) parse CLI
    let cli = Cli::parse();

    // 2) load config once, then apply command-line overrides
    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        cfg.database = db.clone();
    }
    if let Some(name) = &cli.name {
        cfg.connection_name = name.clone();
    }
    if let Some(level) = &cli.log_level {
        cfg.log_level = level.clone();
    }

    // 3) logging
    logging::init(&cfg.log_level)?;

    dispatch(&cli, &cfg)
}
