//! Server-side storage for one-time flash notices.
//!
//! # Responsibility
//! - Keep notices keyed by an opaque token until the next page render.
//!
//! # Invariants
//! - `take_notices` deletes and returns rows in one statement, so a notice is
//!   returned at most once.
//! - Notices older than [`FLASH_TTL_MS`] are never returned.

use crate::db::now_epoch_ms;
use crate::model::flash::{FlashNotice, NoticeLevel};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection};

/// Lifetime of an unread notice.
pub const FLASH_TTL_MS: i64 = 10 * 60 * 1000;

/// Contract for the one-time notice carrier.
pub trait FlashRepository {
    fn push_notice(&self, token: &str, notice: &FlashNotice) -> RepoResult<()>;
    /// Removes and returns every live notice for `token`, oldest first.
    fn take_notices(&self, token: &str) -> RepoResult<Vec<FlashNotice>>;
}

/// SQLite-backed flash notice repository.
pub struct SqliteFlashRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFlashRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FlashRepository for SqliteFlashRepository<'_> {
    fn push_notice(&self, token: &str, notice: &FlashNotice) -> RepoResult<()> {
        let now = now_epoch_ms();
        // Unread notices from abandoned browsers would otherwise pile up.
        self.conn.execute(
            "DELETE FROM flash_notices WHERE created_at < ?1;",
            [now - FLASH_TTL_MS],
        )?;
        self.conn.execute(
            "INSERT INTO flash_notices (token, level, message, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![token, notice.level.as_str(), notice.message.as_str(), now],
        )?;
        Ok(())
    }

    fn take_notices(&self, token: &str) -> RepoResult<Vec<FlashNotice>> {
        let cutoff = now_epoch_ms() - FLASH_TTL_MS;
        let mut stmt = self.conn.prepare(
            "DELETE FROM flash_notices
             WHERE token = ?1
             RETURNING id, level, message, created_at;",
        )?;
        let mut rows = stmt.query([token])?;
        let mut taken = Vec::new();
        while let Some(row) = rows.next()? {
            let id: i64 = row.get("id")?;
            let level_text: String = row.get("level")?;
            let level = NoticeLevel::parse(&level_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid notice level `{level_text}` in flash_notices.level"
                ))
            })?;
            let created_at: i64 = row.get("created_at")?;
            taken.push((
                id,
                created_at,
                FlashNotice {
                    level,
                    message: row.get("message")?,
                },
            ));
        }

        // RETURNING row order is unspecified.
        taken.sort_by_key(|(id, _, _)| *id);
        Ok(taken
            .into_iter()
            .filter(|(_, created_at, _)| *created_at >= cutoff)
            .map(|(_, _, notice)| notice)
            .collect())
    }
}
