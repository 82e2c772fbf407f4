//! Unified application error types.
//!
//! `AppError` covers everything that stops the program. `StatementError`
//! covers a single SQL step that failed; the session logs it and moves on.

use std::fmt;
use std::io;
use thiserror::Error;

/// Exit code used when the initial database open fails.
pub const EXIT_OPEN_FAILED: i32 = 2;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Cannot open database '{target}': {source}")]
    Open {
        target: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Unknown connection: {0}")]
    UnknownConnection(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Invalid configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Open { .. } => EXIT_OPEN_FAILED,
            _ => 1,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Session step a `StatementError` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateTable,
    Insert,
    Begin,
    BatchInsert,
    Commit,
    Delete,
    Update,
    Select,
    ListTables,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::CreateTable => "create table",
            Step::Insert => "insert",
            Step::Begin => "begin transaction",
            Step::BatchInsert => "batch insert",
            Step::Commit => "commit",
            Step::Delete => "delete",
            Step::Update => "update",
            Step::Select => "select",
            Step::ListTables => "list tables",
        };
        f.write_str(s)
    }
}

/// A recoverable failure: the statement that was attempted, what was bound
/// to it and the engine error.
#[derive(Error, Debug)]
#[error("{step} failed: {source}")]
pub struct StatementError {
    pub step: Step,
    pub statement: String,
    pub bound: Vec<Option<String>>,
    #[source]
    pub source: rusqlite::Error,
}

impl StatementError {
    pub fn new(
        step: Step,
        statement: &str,
        bound: &[Option<&str>],
        source: rusqlite::Error,
    ) -> Self {
        Self {
            step,
            statement: statement.to_string(),
            bound: bound.iter().map(|v| v.map(str::to_string)).collect(),
            source,
        }
    }

    /// Bound values rendered for logs, NULL for missing ones.
    pub fn bound_display(&self) -> String {
        let parts: Vec<String> = self
            .bound
            .iter()
            .map(|v| match v {
                Some(s) => format!("{s:?}"),
                None => "NULL".to_string(),
            })
            .collect();
        format!("[{}]", parts.join(", "))
    }
}
