//! Project queries for the home, list and detail pages.
//!
//! # Invariants
//! - Only `is_active = 1` rows are ever returned.
//! - Featured rows additionally require `is_featured = 1`.
//! - List order is `display_order ASC, created_at DESC`; ties beyond that are
//!   broken by `id` to keep output stable.

use crate::model::project::Project;
use crate::repo::{read_flag, RepoResult};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    slug,
    short_description,
    description,
    technologies,
    image_url,
    repository_url,
    live_url,
    display_order,
    is_featured,
    is_active,
    created_at
FROM projects";

/// Read contract for portfolio projects.
pub trait ProjectRepository {
    /// Featured and active projects by `display_order`, at most `limit` rows.
    fn list_featured(&self, limit: u32) -> RepoResult<Vec<Project>>;
    /// All active projects, newest first among equal `display_order`.
    fn list_active(&self) -> RepoResult<Vec<Project>>;
    /// Exact slug lookup; inactive projects are still resolvable by slug.
    fn get_by_slug(&self, slug: &str) -> RepoResult<Option<Project>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn list_featured(&self, limit: u32) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE is_featured = 1
               AND is_active = 1
             ORDER BY display_order ASC, id ASC
             LIMIT ?1;"
        ))?;
        let mut rows = stmt.query([i64::from(limit)])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn list_active(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE is_active = 1
             ORDER BY display_order ASC, created_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn get_by_slug(&self, slug: &str) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE slug = ?1;"))?;
        let mut rows = stmt.query(params![slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        slug: row.get("slug")?,
        short_description: row.get("short_description")?,
        description: row.get("description")?,
        technologies: row.get("technologies")?,
        image_url: row.get("image_url")?,
        repository_url: row.get("repository_url")?,
        live_url: row.get("live_url")?,
        display_order: row.get("display_order")?,
        is_featured: read_flag(row, "projects", "is_featured")?,
        is_active: read_flag(row, "projects", "is_active")?,
        created_at: row.get("created_at")?,
    })
}
