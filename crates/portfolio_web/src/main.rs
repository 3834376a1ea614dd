//! Portfolio site server entry point.
//!
//! Reads configuration, brings up logging, migrates the database once and
//! serves the router until the process is stopped.

use log::{error, info};
use portfolio_core::db::open_db;
use portfolio_core::{
    core_version, init_logging, ConsoleSender, MailBackend, NotificationSender, SiteConfig,
    SmtpSender,
};
use portfolio_web::{build_router, AppState};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal production case.
    let _ = dotenvy::dotenv();

    let config = match SiteConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("portfolio-server: configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("portfolio-server: logging init failed: {err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=web status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: SiteConfig) -> Result<(), String> {
    // Fail fast on an unreadable or too-new database before binding.
    let db_path = config.database_path.clone();
    tokio::task::spawn_blocking(move || open_db(db_path).map(drop))
        .await
        .map_err(|err| format!("migration task failed: {err}"))?
        .map_err(|err| format!("database bootstrap failed: {err}"))?;

    let sender: Arc<dyn NotificationSender> = match &config.mail_backend {
        MailBackend::Console => Arc::new(ConsoleSender),
        MailBackend::Smtp(settings) => Arc::new(SmtpSender::new(settings)),
    };
    let backend = match &config.mail_backend {
        MailBackend::Console => "console",
        MailBackend::Smtp(_) => "smtp",
    };

    let state = AppState::new(config.database_path.clone(), sender, config.routing);
    let app = build_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|err| format!("failed to bind `{}`: {err}", config.bind_addr))?;

    info!(
        "event=server_start module=web status=ok version={} addr={} db={} mail_backend={}",
        core_version(),
        config.bind_addr,
        config.database_path.display(),
        backend
    );

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {err}"))
}
