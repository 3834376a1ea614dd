//! Resume domain model.

use serde::Serialize;

/// Downloadable resume document.
///
/// At most one row is expected to carry `is_default = true`; this is assumed,
/// not enforced, and readers take the lowest id when several match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resume {
    pub id: i64,
    pub title: String,
    pub file_url: String,
    pub summary: Option<String>,
    pub is_default: bool,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}
