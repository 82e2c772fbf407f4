//! The account session script.
//!
//! Each step is a single call into SQLite. A failing step is logged with the
//! statement and its bound values, recorded, and the script carries on.

use crate::db::queries::{self, INSERT_ACCOUNT};
use crate::errors::{StatementError, Step};
use crate::models::account::Account;
use rusqlite::{Connection, params};
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

/// Result of the transactional bulk insert.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Ids handed out inside the transaction, committed or not.
    pub inserted: Vec<i64>,
    pub committed: bool,
}

/// Everything the full script produced.
#[derive(Debug)]
pub struct ScriptReport {
    pub first_id: Option<i64>,
    pub batch: BatchOutcome,
    pub deleted: Option<usize>,
    pub updated: Option<usize>,
    pub accounts: Vec<Account>,
    pub tables: Vec<String>,
    pub failures: Vec<StatementError>,
}

pub struct Session<'c> {
    conn: &'c Connection,
    failures: Vec<StatementError>,
}

impl<'c> Session<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            failures: Vec::new(),
        }
    }

    /// Failures recorded so far, oldest first.
    pub fn failures(&self) -> &[StatementError] {
        &self.failures
    }

    /// Run every step in order against the borrowed connection.
    pub fn run(mut self) -> ScriptReport {
        // 1) schema
        self.create_table();

        // 2) single insert
        let first_id = self.insert(Some("user0"), Some("password0"));

        // 3) user1..user9 in one transaction
        let batch = self.bulk_insert(1..=9);

        // 4) delete + update
        let deleted = self.delete("user4");
        let updated = self.update("passwordX", "user7");

        // 5) read back
        let accounts = self.select();
        let tables = self.list_tables();

        ScriptReport {
            first_id,
            batch,
            deleted,
            updated,
            accounts,
            tables,
            failures: self.failures,
        }
    }

    pub fn create_table(&mut self) -> bool {
        let res = queries::create_account_table(self.conn);
        self.check(Step::CreateTable, queries::CREATE_ACCOUNT_TABLE, &[], res)
            .is_some()
    }

    /// Insert one account; `None` binds NULL.
    pub fn insert(&mut self, name: Option<&str>, password: Option<&str>) -> Option<i64> {
        let res = queries::insert_account(self.conn, name, password);
        let id = self.check(Step::Insert, INSERT_ACCOUNT, &[name, password], res)?;
        info!(id, "added");
        Some(id)
    }

    /// Insert `user{i}`/`password{i}` for every `i` in `range` inside one
    /// transaction. Row failures are logged one by one; the commit is still
    /// attempted afterwards.
    pub fn bulk_insert(&mut self, range: RangeInclusive<u32>) -> BatchOutcome {
        let conn = self.conn;
        let mut outcome = BatchOutcome::default();

        let tx = match conn.unchecked_transaction() {
            Ok(tx) => tx,
            Err(e) => {
                self.fail(StatementError::new(Step::Begin, "BEGIN", &[], e));
                return outcome;
            }
        };

        {
            let mut stmt = match tx.prepare(INSERT_ACCOUNT) {
                Ok(stmt) => stmt,
                Err(e) => {
                    // dropping `tx` rolls it back
                    self.fail(StatementError::new(Step::BatchInsert, INSERT_ACCOUNT, &[], e));
                    return outcome;
                }
            };

            for i in range {
                let name = format!("user{i}");
                let password = format!("password{i}");
                match stmt.execute(params![name, password]) {
                    Ok(_) => outcome.inserted.push(tx.last_insert_rowid()),
                    Err(e) => self.fail(StatementError::new(
                        Step::BatchInsert,
                        INSERT_ACCOUNT,
                        &[Some(name.as_str()), Some(password.as_str())],
                        e,
                    )),
                }
            }
        }

        match tx.commit() {
            Ok(()) => outcome.committed = true,
            Err(e) => self.fail(StatementError::new(Step::Commit, "COMMIT", &[], e)),
        }

        outcome
    }

    /// Returns the number of deleted rows.
    pub fn delete(&mut self, name: &str) -> Option<usize> {
        let res = queries::delete_account(self.conn, name);
        self.check(Step::Delete, queries::DELETE_ACCOUNT_BY_NAME, &[Some(name)], res)
    }

    /// Returns the number of updated rows.
    pub fn update(&mut self, password: &str, name: &str) -> Option<usize> {
        let res = queries::update_password(self.conn, password, name);
        self.check(
            Step::Update,
            queries::UPDATE_PASSWORD_BY_NAME,
            &[Some(password), Some(name)],
            res,
        )
    }

    pub fn select(&mut self) -> Vec<Account> {
        let res = queries::load_accounts(self.conn);
        let accounts = self
            .check(Step::Select, queries::SELECT_ACCOUNTS, &[], res)
            .unwrap_or_default();

        for a in &accounts {
            debug!(id = a.id, name = %a.name, password = %a.password, "account");
        }
        accounts
    }

    pub fn list_tables(&mut self) -> Vec<String> {
        let res = queries::list_tables(self.conn);
        let tables = self
            .check(Step::ListTables, queries::LIST_TABLES, &[], res)
            .unwrap_or_default();

        debug!(?tables, "tables");
        tables
    }

    fn check<T>(
        &mut self,
        step: Step,
        statement: &str,
        bound: &[Option<&str>],
        res: rusqlite::Result<T>,
    ) -> Option<T> {
        match res {
            Ok(v) => Some(v),
            Err(e) => {
                self.fail(StatementError::new(step, statement, bound, e));
                None
            }
        }
    }

    fn fail(&mut self, err: StatementError) {
        warn!(step = %err.step, error = %err.source, "statement failed");
        info!(statement = %err.statement, bound = %err.bound_display(), "failed statement");
        self.failures.push(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::load_accounts;

    #[test]
    fn full_run_leaves_nine_accounts() {
        let conn = Connection::open_in_memory().unwrap();
        let report = Session::new(&conn).run();

        assert!(report.failures.is_empty(), "{:?}", report.failures);
        assert_eq!(report.first_id, Some(1));
        assert_eq!(report.batch.inserted.len(), 9);
        assert!(report.batch.committed);
        assert_eq!(report.deleted, Some(1));
        assert_eq!(report.updated, Some(1));
        assert_eq!(report.accounts.len(), 9);
        assert_eq!(report.tables, vec!["account"]);
    }

    #[test]
    fn begin_failure_skips_the_whole_batch() {
        let conn = Connection::open_in_memory().unwrap();
        let mut session = Session::new(&conn);
        assert!(session.create_table());

        conn.execute_batch("BEGIN").unwrap();
        let outcome = session.bulk_insert(1..=9);
        conn.execute_batch("ROLLBACK").unwrap();

        assert_eq!(outcome, BatchOutcome::default());
        assert_eq!(session.failures().len(), 1);
        assert_eq!(session.failures()[0].step, Step::Begin);
        assert!(load_accounts(&conn).unwrap().is_empty());
    }

    #[test]
    fn batch_row_failures_do_not_stop_the_loop() {
        let conn = Connection::open_in_memory().unwrap();
        let mut session = Session::new(&conn);
        assert!(session.create_table());
        conn.execute_batch(
            "CREATE UNIQUE INDEX account_name ON account(name);
             INSERT INTO account(name, password) VALUES ('user3', 'taken');",
        )
        .unwrap();

        let outcome = session.bulk_insert(1..=5);

        assert!(outcome.committed);
        assert_eq!(outcome.inserted.len(), 4);
        assert_eq!(session.failures().len(), 1);
        let f = &session.failures()[0];
        assert_eq!(f.step, Step::BatchInsert);
        assert_eq!(f.bound, vec![Some("user3".to_string()), Some("password3".to_string())]);
        assert_eq!(load_accounts(&conn).unwrap().len(), 5);
    }

    #[test]
    fn prepare_failure_rolls_the_batch_back() {
        let conn = Connection::open_in_memory().unwrap();
        let mut session = Session::new(&conn);

        // no table yet, so the insert cannot be prepared
        let outcome = session.bulk_insert(1..=9);
        assert_eq!(outcome, BatchOutcome::default());
        assert_eq!(session.failures().len(), 1);
        assert_eq!(session.failures()[0].step, Step::BatchInsert);
        assert!(conn.is_autocommit(), "transaction left open");

        assert!(session.create_table());
        let outcome = session.bulk_insert(1..=2);
        assert!(outcome.committed);
        assert_eq!(load_accounts(&conn).unwrap().len(), 2);
    }

    #[test]
    fn missing_table_is_logged_for_every_step() {
        let conn = Connection::open_in_memory().unwrap();
        let mut session = Session::new(&conn);

        assert_eq!(session.insert(Some("a"), Some("b")), None);
        assert_eq!(session.delete("a"), None);
        assert_eq!(session.update("x", "a"), None);
        assert!(session.select().is_empty());

        let steps: Vec<Step> = session.failures().iter().map(|f| f.step).collect();
        assert_eq!(
            steps,
            vec![Step::Insert, Step::Delete, Step::Update, Step::Select]
        );
        assert_eq!(
            session.failures()[2].statement,
            "UPDATE account SET password = ? WHERE name = ?"
        );
    }
}
