//! Request-level error and its HTTP mapping.

use crate::templates::{NotFoundTemplate, ServerErrorTemplate};
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::{error, info};
use portfolio_core::db::DbError;
use portfolio_core::logging::sanitize_message;
use portfolio_core::{ContactError, PageError, RepoError};
use std::fmt::{Display, Formatter};

const MAX_LOGGED_ERROR_CHARS: usize = 300;

/// Error surfaced from a handler.
#[derive(Debug)]
pub enum AppError {
    /// Unknown route or unknown project slug; carries the missing key.
    NotFound(String),
    /// Storage, transport or rendering failure.
    Internal(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<PageError> for AppError {
    fn from(value: PageError) -> Self {
        match value {
            PageError::ProjectNotFound(slug) => Self::NotFound(format!("project `{slug}`")),
            PageError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<ContactError> for AppError {
    fn from(value: ContactError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(value: askama::Error) -> Self {
        Self::Internal(format!("template render failed: {value}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(what) => {
                info!(
                    "event=page_render module=web status=not_found target={}",
                    sanitize_message(&what, MAX_LOGGED_ERROR_CHARS)
                );
                render_status(StatusCode::NOT_FOUND, NotFoundTemplate::default().render())
            }
            Self::Internal(message) => {
                error!(
                    "event=page_render module=web status=error error={}",
                    sanitize_message(&message, MAX_LOGGED_ERROR_CHARS)
                );
                render_status(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ServerErrorTemplate::default().render(),
                )
            }
        }
    }
}

fn render_status(status: StatusCode, rendered: askama::Result<String>) -> Response {
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!(
                "event=page_render module=web status=error error_code=error_page_render_failed error={}",
                err
            );
            (status, status.canonical_reason().unwrap_or("Error")).into_response()
        }
    }
}
