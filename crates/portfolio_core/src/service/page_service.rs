//! Page controllers: repository reads composed into typed template contexts.
//!
//! # Responsibility
//! - Attach per-page `meta_title` / `meta_description`.
//! - Select records for each page through the query layer.
//!
//! # Invariants
//! - The home page never carries more than [`FEATURED_PROJECT_LIMIT`] projects.
//! - An unknown project slug is an error, never a fallback project.
//! - A missing default resume is an explicit `None`, not an error.

use crate::model::project::Project;
use crate::model::resume::Resume;
use crate::model::skill::Skill;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::resume_repo::ResumeRepository;
use crate::repo::skill_repo::SkillRepository;
use crate::repo::RepoError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of featured projects on the home page.
pub const FEATURED_PROJECT_LIMIT: u32 = 3;

const HOME_TITLE: &str = "Professional Portfolio";
const HOME_DESCRIPTION: &str =
    "Welcome to my professional portfolio showcasing my skills and projects.";
const ABOUT_TITLE: &str = "About Me";
const ABOUT_DESCRIPTION: &str = "Learn more about my professional background and skills.";
const PROJECTS_TITLE: &str = "My Projects";
const PROJECTS_DESCRIPTION: &str =
    "Explore my portfolio of professional projects and work samples.";
const RESUME_TITLE: &str = "My Resume";
const RESUME_DESCRIPTION: &str = "Download my professional resume and view my work experience.";
const CONTACT_TITLE: &str = "Contact Me";
const CONTACT_DESCRIPTION: &str =
    "Get in touch with me for professional inquiries or collaborations.";
const NOT_FOUND_TITLE: &str = "Page Not Found";
const NOT_FOUND_DESCRIPTION: &str = "The page you are looking for does not exist.";

/// Error raised while building a page context.
#[derive(Debug)]
pub enum PageError {
    ProjectNotFound(String),
    Repo(RepoError),
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(slug) => write!(f, "project not found: {slug}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ProjectNotFound(_) => None,
        }
    }
}

impl From<RepoError> for PageError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type PageResult<T> = Result<T, PageError>;

/// SEO metadata carried by every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub meta_title: String,
    pub meta_description: String,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta_title: title.into(),
            meta_description: description.into(),
        }
    }

    pub fn contact() -> Self {
        Self::new(CONTACT_TITLE, CONTACT_DESCRIPTION)
    }

    pub fn not_found() -> Self {
        Self::new(NOT_FOUND_TITLE, NOT_FOUND_DESCRIPTION)
    }
}

/// Skills sharing one category, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeContext {
    pub meta: PageMeta,
    pub featured_projects: Vec<Project>,
    /// Flat list ordered by `(category, display_order)`.
    pub skills: Vec<Skill>,
    /// `skills` grouped by consecutive category.
    pub skill_groups: Vec<SkillGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutContext {
    pub meta: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectListContext {
    pub meta: PageMeta,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetailContext {
    pub meta: PageMeta,
    pub project: Project,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeContext {
    pub meta: PageMeta,
    pub resume: Option<Resume>,
}

/// Read-only page controller over the three content repositories.
pub struct PageService<P, S, R>
where
    P: ProjectRepository,
    S: SkillRepository,
    R: ResumeRepository,
{
    projects: P,
    skills: S,
    resumes: R,
}

impl<P, S, R> PageService<P, S, R>
where
    P: ProjectRepository,
    S: SkillRepository,
    R: ResumeRepository,
{
    pub fn new(projects: P, skills: S, resumes: R) -> Self {
        Self {
            projects,
            skills,
            resumes,
        }
    }

    /// Home page: up to three featured projects plus all active skills.
    pub fn home(&self) -> PageResult<HomeContext> {
        let featured_projects = self.projects.list_featured(FEATURED_PROJECT_LIMIT)?;
        let skills = self.skills.list_active()?;
        let skill_groups = group_skills(&skills);
        Ok(HomeContext {
            meta: PageMeta::new(HOME_TITLE, HOME_DESCRIPTION),
            featured_projects,
            skills,
            skill_groups,
        })
    }

    pub fn about(&self) -> AboutContext {
        AboutContext {
            meta: PageMeta::new(ABOUT_TITLE, ABOUT_DESCRIPTION),
        }
    }

    pub fn project_list(&self) -> PageResult<ProjectListContext> {
        Ok(ProjectListContext {
            meta: PageMeta::new(PROJECTS_TITLE, PROJECTS_DESCRIPTION),
            projects: self.projects.list_active()?,
        })
    }

    /// Project detail with metadata derived from the project itself.
    ///
    /// # Errors
    /// - [`PageError::ProjectNotFound`] when no project has `slug`.
    pub fn project_detail(&self, slug: &str) -> PageResult<ProjectDetailContext> {
        let project = self
            .projects
            .get_by_slug(slug)?
            .ok_or_else(|| PageError::ProjectNotFound(slug.to_string()))?;
        Ok(ProjectDetailContext {
            meta: PageMeta::new(
                format!("Project: {}", project.title),
                project.short_description.clone(),
            ),
            project,
        })
    }

    pub fn resume(&self) -> PageResult<ResumeContext> {
        Ok(ResumeContext {
            meta: PageMeta::new(RESUME_TITLE, RESUME_DESCRIPTION),
            resume: self.resumes.get_default()?,
        })
    }
}

/// Groups already-ordered skills by consecutive category.
pub fn group_skills(skills: &[Skill]) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for skill in skills {
        match groups.last_mut() {
            Some(group) if group.category == skill.category => group.skills.push(skill.clone()),
            _ => groups.push(SkillGroup {
                category: skill.category.clone(),
                skills: vec![skill.clone()],
            }),
        }
    }
    groups
}
