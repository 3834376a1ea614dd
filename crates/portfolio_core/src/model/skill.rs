//! Skill domain model.

use serde::Serialize;

/// One skill entry; the home page groups these by `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Self-assessed level in `0..=100`.
    pub proficiency: i64,
    pub display_order: i64,
    pub is_active: bool,
}
