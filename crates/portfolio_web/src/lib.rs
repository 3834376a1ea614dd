//! HTTP surface for the portfolio site.
//!
//! # Responsibility
//! - Route requests to page controllers and the contact flow.
//! - Render typed contexts through askama templates.
//! - Carry one-time notices across the contact redirect.
//!
//! # Invariants
//! - Handlers never touch SQLite or SMTP on the async runtime threads.
//! - Each request opens its own connection; nothing mutable is shared.

use axum::routing::get;
use axum::{middleware, Router};
use std::path::Path;
use tower_http::services::ServeDir;

pub mod error;
pub mod flash;
pub mod handlers;
pub mod request_log;
pub mod state;
pub mod templates;

pub use error::AppError;
pub use state::AppState;

/// Builds the full site router.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/projects", get(handlers::project_list))
        .route("/projects/:slug", get(handlers::project_detail))
        .route("/resume", get(handlers::resume))
        .route(
            "/contact",
            get(handlers::contact_form).post(handlers::contact_submit),
        )
        .route("/health", get(handlers::health))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(request_log::log_requests))
        .with_state(state)
}
