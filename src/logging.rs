//! tracing subscriber setup. Diagnostics go to stderr so stdout stays free
//! for the user-facing summary.

use crate::errors::{AppError, AppResult};
use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init(level: &str) -> AppResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_for(level)?,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_level(true)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

/// Parse a filter directive, rejecting malformed ones.
pub fn filter_for(level: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| AppError::Logging(format!("invalid filter '{level}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_levels_and_targets_parse() {
        assert!(filter_for("debug").is_ok());
        assert!(filter_for("warn,account_session=trace").is_ok());
    }

    #[test]
    fn bad_level_is_rejected() {
        let err = filter_for("account_session=loud").unwrap_err();
        assert!(matches!(err, AppError::Logging(msg) if msg.contains("account_session=loud")));
    }
}
