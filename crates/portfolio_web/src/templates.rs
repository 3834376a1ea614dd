//! askama template bindings, one struct per page.
//!
//! Every template exposes `page.meta` and `notices` to `base.html`.

use askama::Template;
use portfolio_core::{
    AboutContext, ContactContext, FlashNotice, HomeContext, PageMeta, ProjectDetailContext,
    ProjectListContext, ResumeContext,
};

/// Context for pages that only carry metadata.
pub struct MetaOnly {
    pub meta: PageMeta,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: HomeContext,
    pub notices: Vec<FlashNotice>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: AboutContext,
    pub notices: Vec<FlashNotice>,
}

#[derive(Template)]
#[template(path = "projects.html")]
pub struct ProjectListTemplate {
    pub page: ProjectListContext,
    pub notices: Vec<FlashNotice>,
}

#[derive(Template)]
#[template(path = "project_detail.html")]
pub struct ProjectDetailTemplate {
    pub page: ProjectDetailContext,
    /// Precomputed from `page.project.technologies`.
    pub technologies: Vec<String>,
    pub notices: Vec<FlashNotice>,
}

impl ProjectDetailTemplate {
    pub fn new(page: ProjectDetailContext, notices: Vec<FlashNotice>) -> Self {
        let technologies = page
            .project
            .technology_list()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            page,
            technologies,
            notices,
        }
    }
}

#[derive(Template)]
#[template(path = "resume.html")]
pub struct ResumeTemplate {
    pub page: ResumeContext,
    pub notices: Vec<FlashNotice>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub page: ContactContext,
    pub notices: Vec<FlashNotice>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub page: MetaOnly,
    pub notices: Vec<FlashNotice>,
}

impl Default for NotFoundTemplate {
    fn default() -> Self {
        Self {
            page: MetaOnly {
                meta: PageMeta::not_found(),
            },
            notices: Vec::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "server_error.html")]
pub struct ServerErrorTemplate {
    pub page: MetaOnly,
    pub notices: Vec<FlashNotice>,
}

impl Default for ServerErrorTemplate {
    fn default() -> Self {
        Self {
            page: MetaOnly {
                meta: PageMeta::new(
                    "Server Error",
                    "Something went wrong while handling your request.",
                ),
            },
            notices: Vec::new(),
        }
    }
}
