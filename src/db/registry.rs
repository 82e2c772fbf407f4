//! Named SQLite connections (lightweight, one process, one thread).

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Target string that selects a private in-memory database.
pub const MEMORY: &str = ":memory:";

#[derive(Default)]
pub struct ConnectionRegistry {
    conns: HashMap<String, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `target` and register it as `name`.
    ///
    /// A connection already registered under `name` is closed and replaced.
    pub fn add_database(&mut self, name: &str, target: &str) -> AppResult<&Connection> {
        if self.contains(name) {
            warn!(connection = name, "connection name already in use, old connection removed");
            self.remove_database(name)?;
        }

        let conn = open(target).map_err(|source| AppError::Open {
            target: target.to_string(),
            source,
        })?;
        debug!(connection = name, db = target, "database opened");

        Ok(self.conns.entry(name.to_string()).or_insert(conn))
    }

    pub fn database(&self, name: &str) -> Option<&Connection> {
        self.conns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.conns.contains_key(name)
    }

    /// Close the connection registered as `name` and forget the name.
    pub fn remove_database(&mut self, name: &str) -> AppResult<()> {
        let conn = self
            .conns
            .remove(name)
            .ok_or_else(|| AppError::UnknownConnection(name.to_string()))?;

        conn.close().map_err(|(_, e)| AppError::Db(e))?;
        debug!(connection = name, "database closed");
        Ok(())
    }
}

fn open(target: &str) -> rusqlite::Result<Connection> {
    if target == MEMORY {
        Connection::open_in_memory()
    } else {
        Connection::open(Path::new(target))
    }
}
