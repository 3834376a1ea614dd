//! Domain records rendered by the portfolio pages.
//!
//! # Responsibility
//! - Define typed records for every table the site reads or writes.
//! - Own contact-form validation rules.
//!
//! # Invariants
//! - Projects, skills and resumes are read-only from the site's perspective.
//! - Contact messages are only ever created from a validated form.

pub mod contact;
pub mod flash;
pub mod project;
pub mod resume;
pub mod skill;
