use crate::config::Config;
use crate::core::session::{ScriptReport, Session};
use crate::db::registry::ConnectionRegistry;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use tracing::info;

/// Handle the `run` command
///
/// Open → session steps → close. Only the open can fail the command; every
/// statement failure inside the session is logged and reported.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let report = execute(cfg)?;
    messages::print_report(&cfg.connection_name, &report);
    Ok(())
}

/// Run the session against the configured target and return its report.
pub fn execute(cfg: &Config) -> AppResult<ScriptReport> {
    let mut registry = ConnectionRegistry::new();

    //
    // 1) OPEN
    //
    registry.add_database(&cfg.connection_name, &cfg.database)?;
    let conn = registry
        .database(&cfg.connection_name)
        .ok_or_else(|| AppError::UnknownConnection(cfg.connection_name.clone()))?;
    info!(connection = %cfg.connection_name, db = %cfg.database, "session started");

    //
    // 2) SCRIPT
    //
    let report = Session::new(conn).run();

    //
    // 3) CLOSE (connection + name)
    //
    registry.remove_database(&cfg.connection_name)?;
    info!(failures = report.failures.len(), "session finished");

    Ok(report)
}
