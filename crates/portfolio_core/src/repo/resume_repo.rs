//! Default-resume lookup for the resume page.

use crate::model::resume::Resume;
use crate::repo::{read_flag, RepoResult};
use rusqlite::Connection;

/// Read contract for resumes.
pub trait ResumeRepository {
    /// First resume flagged `is_default`, or `None` when there is none.
    fn get_default(&self) -> RepoResult<Option<Resume>>;
}

/// SQLite-backed resume repository.
pub struct SqliteResumeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResumeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ResumeRepository for SqliteResumeRepository<'_> {
    fn get_default(&self) -> RepoResult<Option<Resume>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                title,
                file_url,
                summary,
                is_default,
                updated_at
             FROM resumes
             WHERE is_default = 1
             ORDER BY id ASC
             LIMIT 1;",
        )?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Resume {
                id: row.get("id")?,
                title: row.get("title")?,
                file_url: row.get("file_url")?,
                summary: row.get("summary")?,
                is_default: read_flag(row, "resumes", "is_default")?,
                updated_at: row.get("updated_at")?,
            }));
        }
        Ok(None)
    }
}
