//! Route handlers.
//!
//! Page handlers share one shape: open a connection on a blocking thread,
//! take any pending flash notices, build the page context, render.

use crate::error::AppError;
use crate::flash;
use crate::state::AppState;
use crate::templates::{
    AboutTemplate, ContactTemplate, HomeTemplate, ProjectDetailTemplate, ProjectListTemplate,
    ResumeTemplate,
};
use askama::Template;
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use log::debug;
use portfolio_core::{
    core_version, ContactContext, ContactFormInput, ContactService, ContactSubmission,
    FlashNotice, FlashRepository, PageService, SqliteContactRepository, SqliteFlashRepository,
    SqliteProjectRepository, SqliteResumeRepository, SqliteSkillRepository,
};
use rusqlite::Connection;
use std::sync::Arc;

type SqlitePageService<'conn> = PageService<
    SqliteProjectRepository<'conn>,
    SqliteSkillRepository<'conn>,
    SqliteResumeRepository<'conn>,
>;

fn page_service(conn: &Connection) -> SqlitePageService<'_> {
    PageService::new(
        SqliteProjectRepository::new(conn),
        SqliteSkillRepository::new(conn),
        SqliteResumeRepository::new(conn),
    )
}

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    render_page(
        state,
        &headers,
        |conn| Ok(page_service(conn).home()?),
        |page, notices| HomeTemplate { page, notices },
    )
    .await
}

pub async fn about(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    render_page(
        state,
        &headers,
        |conn| Ok(page_service(conn).about()),
        |page, notices| AboutTemplate { page, notices },
    )
    .await
}

pub async fn project_list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    render_page(
        state,
        &headers,
        |conn| Ok(page_service(conn).project_list()?),
        |page, notices| ProjectListTemplate { page, notices },
    )
    .await
}

pub async fn project_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    render_page(
        state,
        &headers,
        move |conn| Ok(page_service(conn).project_detail(&slug)?),
        ProjectDetailTemplate::new,
    )
    .await
}

pub async fn resume(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    render_page(
        state,
        &headers,
        |conn| Ok(page_service(conn).resume()?),
        |page, notices| ResumeTemplate { page, notices },
    )
    .await
}

pub async fn contact_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    render_page(
        state,
        &headers,
        |_conn| Ok(ContactContext::blank()),
        |page, notices| ContactTemplate { page, notices },
    )
    .await
}

enum SubmitOutcome {
    Redirect {
        token: String,
        location: &'static str,
    },
    Form(String),
}

/// Handles the contact POST.
///
/// Invalid input re-renders the form (200). Accepted input stores a flash
/// notice and answers `303 See Other` so a browser refresh cannot resubmit.
pub async fn contact_submit(
    State(state): State<AppState>,
    Form(input): Form<ContactFormInput>,
) -> Result<Response, AppError> {
    let outcome = run_blocking(move || {
        let conn = state.open_db()?;
        let service = ContactService::new(
            SqliteContactRepository::new(&conn),
            Arc::clone(&state.sender),
            &state.routing,
        );

        match service.submit(&input)? {
            ContactSubmission::Accepted {
                notice,
                redirect_to,
                ..
            } => {
                let token = flash::new_token();
                SqliteFlashRepository::new(&conn).push_notice(&token, &notice)?;
                Ok(SubmitOutcome::Redirect {
                    token,
                    location: redirect_to,
                })
            }
            ContactSubmission::Rejected(page) => {
                let html = ContactTemplate {
                    page,
                    notices: Vec::new(),
                }
                .render()?;
                Ok(SubmitOutcome::Form(html))
            }
        }
    })
    .await?;

    Ok(match outcome {
        SubmitOutcome::Redirect { token, location } => (
            [(SET_COOKIE, flash::flash_cookie(&token))],
            Redirect::to(location),
        )
            .into_response(),
        SubmitOutcome::Form(html) => Html(html).into_response(),
    })
}

pub async fn health() -> String {
    format!("ok version={}", core_version())
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Renders one page on a blocking thread, consuming pending flash notices.
///
/// Notices are only taken once `build` has produced the page context, so a
/// failed page (404, storage error) leaves them for the next render. When
/// notices were taken, the response clears the cookie.
async fn render_page<P, T, B, W>(
    state: AppState,
    headers: &HeaderMap,
    build: B,
    wrap: W,
) -> Result<Response, AppError>
where
    T: Template,
    B: FnOnce(&Connection) -> Result<P, AppError> + Send + 'static,
    W: FnOnce(P, Vec<FlashNotice>) -> T + Send + 'static,
{
    let token = flash::token_from_headers(headers);
    let clears_cookie = token.is_some();

    let html = run_blocking(move || {
        let conn = state.open_db()?;
        let page = build(&conn)?;
        let notices = match token.as_deref() {
            Some(token) => {
                let notices = SqliteFlashRepository::new(&conn).take_notices(token)?;
                debug!(
                    "event=flash_take module=web status=ok count={}",
                    notices.len()
                );
                notices
            }
            None => Vec::new(),
        };
        Ok(wrap(page, notices).render()?)
    })
    .await?;

    let mut response = Html(html).into_response();
    if clears_cookie {
        response
            .headers_mut()
            .insert(SET_COOKIE, HeaderValue::from_static(flash::CLEAR_FLASH_COOKIE));
    }
    Ok(response)
}

async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| AppError::Internal(format!("blocking task failed: {err}")))?
}
