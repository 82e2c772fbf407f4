//! Account row model.

/// One row of the `account` table.
///
/// The password is kept in plain text.
// TODO: hash passwords before they reach the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub password: String,
}
