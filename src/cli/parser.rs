use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for account-session
/// Runs a fixed account-table session against SQLite
#[derive(Parser)]
#[command(
    name = "account-session",
    version = env!("CARGO_PKG_VERSION"),
    about = "Open an SQLite database, run a fixed account session against it and close it",
    long_about = None
)]
pub struct Cli {
    /// Database target: `:memory:` or a file path
    #[arg(global = true, long = "db", value_name = "TARGET")]
    pub db: Option<String>,

    /// Name the connection is registered under
    #[arg(global = true, long = "name", value_name = "CONNECTION")]
    pub name: Option<String>,

    /// YAML configuration file
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter (overridden by RUST_LOG)
    #[arg(global = true, long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the account session (default)
    Run,

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration as YAML")]
        print: bool,
    },
}
