//! Project domain model.

use serde::Serialize;

/// Portfolio project shown on the home, list and detail pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    /// Unique URL segment used by `/projects/:slug`.
    pub slug: String,
    pub short_description: String,
    pub description: String,
    /// Comma-separated technology names, see [`Project::technology_list`].
    pub technologies: String,
    pub image_url: Option<String>,
    pub repository_url: Option<String>,
    pub live_url: Option<String>,
    /// Manual sort key, ascending.
    pub display_order: i64,
    pub is_featured: bool,
    pub is_active: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Project {
    /// Splits the stored technology string into trimmed, non-empty names.
    pub fn technology_list(&self) -> Vec<&str> {
        self.technologies
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}
