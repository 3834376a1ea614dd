//! Core domain logic for the portfolio site.
//! Storage, queries, page controllers and the contact flow live here; the
//! HTTP surface is a thin layer on top.

pub mod config;
pub mod db;
pub mod logging;
pub mod mail;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ContactRouting, MailBackend, SiteConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mail::{ConsoleSender, NotificationSender, SmtpSender, SmtpSettings, TransportError};
pub use model::contact::{ContactFormErrors, ContactFormInput, ContactMessage, NewContactMessage};
pub use model::flash::{FlashNotice, NoticeLevel};
pub use model::project::Project;
pub use model::resume::Resume;
pub use model::skill::Skill;
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::flash_repo::{FlashRepository, SqliteFlashRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::resume_repo::{ResumeRepository, SqliteResumeRepository};
pub use repo::skill_repo::{SkillRepository, SqliteSkillRepository};
pub use repo::{RepoError, RepoResult};
pub use service::contact_service::{
    ContactContext, ContactError, ContactService, ContactSubmission, CONTACT_PATH,
    CONTACT_SUCCESS_MESSAGE,
};
pub use service::page_service::{
    AboutContext, HomeContext, PageError, PageMeta, PageResult, PageService,
    ProjectDetailContext, ProjectListContext, ResumeContext, SkillGroup,
};

/// Crate version, reported by the health endpoint.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
