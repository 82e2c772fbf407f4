use crate::models::account::Account;
use rusqlite::{Connection, Result, Row, params};

pub const CREATE_ACCOUNT_TABLE: &str = "CREATE TABLE account(\
     id INTEGER PRIMARY KEY, \
     name TEXT NOT NULL, \
     password TEXT NOT NULL\
     )";

pub const INSERT_ACCOUNT: &str = "INSERT INTO account(name, password) VALUES (?, ?)";

pub const DELETE_ACCOUNT_BY_NAME: &str = "DELETE FROM account WHERE name = ?";

pub const UPDATE_PASSWORD_BY_NAME: &str = "UPDATE account SET password = ? WHERE name = ?";

pub const SELECT_ACCOUNTS: &str = "SELECT id, name, password FROM account";

pub const LIST_TABLES: &str = "SELECT name FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
     ORDER BY name ASC";

pub fn map_row(row: &Row) -> Result<Account> {
    Ok(Account {
        id: row.get("id")?,
        name: row.get("name")?,
        password: row.get("password")?,
    })
}

pub fn create_account_table(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_ACCOUNT_TABLE, [])?;
    Ok(())
}

/// Insert one account and return the id SQLite assigned to it.
pub fn insert_account(conn: &Connection, name: Option<&str>, password: Option<&str>) -> Result<i64> {
    conn.execute(INSERT_ACCOUNT, params![name, password])?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_account(conn: &Connection, name: &str) -> Result<usize> {
    conn.execute(DELETE_ACCOUNT_BY_NAME, [name])
}

pub fn update_password(conn: &Connection, password: &str, name: &str) -> Result<usize> {
    conn.execute(UPDATE_PASSWORD_BY_NAME, params![password, name])
}

/// All accounts in result-set order (no ORDER BY).
pub fn load_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(SELECT_ACCOUNTS)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// User tables of the connection, sorted by name.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(LIST_TABLES)?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_account_table(&conn).unwrap();
        conn
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let conn = fresh();
        let a = insert_account(&conn, Some("a"), Some("x")).unwrap();
        let b = insert_account(&conn, Some("b"), Some("y")).unwrap();
        assert!(b > a);
    }

    #[test]
    fn null_password_is_rejected() {
        let conn = fresh();
        let err = insert_account(&conn, Some("a"), None).unwrap_err();
        assert!(err.to_string().contains("NOT NULL"));
        assert!(load_accounts(&conn).unwrap().is_empty());
    }

    #[test]
    fn update_and_delete_report_affected_rows() {
        let conn = fresh();
        insert_account(&conn, Some("a"), Some("x")).unwrap();
        insert_account(&conn, Some("a"), Some("y")).unwrap();

        assert_eq!(update_password(&conn, "z", "a").unwrap(), 2);
        assert_eq!(update_password(&conn, "z", "missing").unwrap(), 0);
        assert_eq!(delete_account(&conn, "a").unwrap(), 2);
    }

    #[test]
    fn list_tables_skips_internal_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t(id INTEGER PRIMARY KEY AUTOINCREMENT, v TEXT);")
            .unwrap();
        create_account_table(&conn).unwrap();
        // AUTOINCREMENT creates sqlite_sequence
        assert_eq!(list_tables(&conn).unwrap(), vec!["account", "t"]);
    }
}
