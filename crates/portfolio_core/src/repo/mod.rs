//! Query layer: repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define one read/write contract per table the site touches.
//! - Keep filtering and ordering predicates inside SQL, next to the schema.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - No result is cached; every call queries storage.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact_repo;
pub mod flash_repo;
pub mod project_repo;
pub mod resume_repo;
pub mod skill_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every table-level contract.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Reads a 0/1 INTEGER flag column, rejecting any other stored value.
pub(crate) fn read_flag(row: &rusqlite::Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in {table}.{column}"
        ))),
    }
}
