//! Skill queries for the home page.

use crate::model::skill::Skill;
use crate::repo::{read_flag, RepoResult};
use rusqlite::{Connection, Row};

/// Read contract for skills.
pub trait SkillRepository {
    /// Active skills ordered by `category ASC, display_order ASC`.
    fn list_active(&self) -> RepoResult<Vec<Skill>>;
}

/// SQLite-backed skill repository.
pub struct SqliteSkillRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSkillRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SkillRepository for SqliteSkillRepository<'_> {
    fn list_active(&self) -> RepoResult<Vec<Skill>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                name,
                category,
                proficiency,
                display_order,
                is_active
             FROM skills
             WHERE is_active = 1
             ORDER BY category ASC, display_order ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut skills = Vec::new();
        while let Some(row) = rows.next()? {
            skills.push(parse_skill_row(row)?);
        }
        Ok(skills)
    }
}

fn parse_skill_row(row: &Row<'_>) -> RepoResult<Skill> {
    Ok(Skill {
        id: row.get("id")?,
        name: row.get("name")?,
        category: row.get("category")?,
        proficiency: row.get("proficiency")?,
        display_order: row.get("display_order")?,
        is_active: read_flag(row, "skills", "is_active")?,
    })
}
