//! Contact message persistence.
//!
//! # Invariants
//! - Rows are only inserted, never updated or deleted.
//! - Inserted values come from a validated [`NewContactMessage`].

use crate::db::now_epoch_ms;
use crate::model::contact::{ContactMessage, NewContactMessage};
use crate::repo::RepoResult;
use rusqlite::{params, Connection};

/// Write contract for contact messages.
pub trait ContactRepository {
    /// Inserts one message stamped with the current time and returns it.
    fn create_message(&self, message: &NewContactMessage) -> RepoResult<ContactMessage>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_message(&self, message: &NewContactMessage) -> RepoResult<ContactMessage> {
        let created_at = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO contact_messages (
                name,
                email,
                subject,
                message,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                message.name.as_str(),
                message.email.as_str(),
                message.subject.as_str(),
                message.message.as_str(),
                created_at,
            ],
        )?;

        Ok(ContactMessage {
            id: self.conn.last_insert_rowid(),
            name: message.name.clone(),
            email: message.email.clone(),
            subject: message.subject.clone(),
            message: message.message.clone(),
            created_at,
        })
    }
}
