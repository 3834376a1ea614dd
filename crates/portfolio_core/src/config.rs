//! Process-wide site configuration read once at startup.
//!
//! # Responsibility
//! - Resolve database, listener, logging and mail settings from environment
//!   variables with documented defaults.
//! - Validate the notification addresses before the server accepts traffic.
//!
//! # Invariants
//! - Configuration is immutable after [`SiteConfig::from_env`] returns.
//! - SMTP credentials are either both present or both absent.

use crate::logging::default_log_level;
use crate::mail::SmtpSettings;
use crate::model::contact::is_valid_email;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const DEFAULT_DATABASE_PATH: &str = "portfolio.sqlite3";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_LOG_DIR_NAME: &str = "logs";
const DEFAULT_SMTP_PORT: u16 = 25;

/// Configuration error raised while reading the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidValue { key: &'static str, value: String },
    InvalidEmail { key: &'static str, value: String },
    IncompleteCredentials,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "required setting `{key}` is not set"),
            Self::InvalidValue { key, value } => {
                write!(f, "setting `{key}` has invalid value `{value}`")
            }
            Self::InvalidEmail { key, value } => {
                write!(f, "setting `{key}` is not a valid email address: `{value}`")
            }
            Self::IncompleteCredentials => {
                write!(f, "SMTP_USERNAME and SMTP_PASSWORD must be set together")
            }
        }
    }
}

impl Error for ConfigError {}

/// Addresses used for contact notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRouting {
    /// `DEFAULT_FROM_EMAIL`.
    pub from_email: String,
    /// `CONTACT_EMAIL`.
    pub contact_email: String,
}

/// Which transport delivers notification mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    Console,
    Smtp(SmtpSettings),
}

/// Full site configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub database_path: PathBuf,
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub routing: ContactRouting,
    pub mail_backend: MailBackend,
}

impl SiteConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Self::from_lookup(cwd, |key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, resolving the log directory
    /// against `cwd` when it is relative.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(cwd: PathBuf, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let routing = ContactRouting {
            from_email: required_email(&get, "DEFAULT_FROM_EMAIL")?,
            contact_email: required_email(&get, "CONTACT_EMAIL")?,
        };

        let mail_backend = match get("EMAIL_BACKEND").as_deref() {
            None | Some("console") => MailBackend::Console,
            Some("smtp") => MailBackend::Smtp(smtp_settings(&get)?),
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "EMAIL_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let log_dir = get("PORTFOLIO_LOG_DIR")
            .map(|value| cwd.join(value))
            .unwrap_or_else(|| cwd.join(DEFAULT_LOG_DIR_NAME));

        Ok(Self {
            database_path: PathBuf::from(
                get("PORTFOLIO_DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.into()),
            ),
            bind_addr: get("PORTFOLIO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            static_dir: PathBuf::from(
                get("PORTFOLIO_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.into()),
            ),
            log_level: get("PORTFOLIO_LOG_LEVEL")
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
            routing,
            mail_backend,
        })
    }
}

fn required_email<G>(get: &G, key: &'static str) -> Result<String, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let value = get(key).ok_or(ConfigError::Missing(key))?;
    if !is_valid_email(&value) {
        return Err(ConfigError::InvalidEmail { key, value });
    }
    Ok(value)
}

fn smtp_settings<G>(get: &G) -> Result<SmtpSettings, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let host = get("SMTP_HOST").ok_or(ConfigError::Missing("SMTP_HOST"))?;
    let port = match get("SMTP_PORT") {
        Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            key: "SMTP_PORT",
            value,
        })?,
        None => DEFAULT_SMTP_PORT,
    };
    let credentials = match (get("SMTP_USERNAME"), get("SMTP_PASSWORD")) {
        (Some(username), Some(password)) => Some((username, password)),
        (None, None) => None,
        _ => return Err(ConfigError::IncompleteCredentials),
    };
    Ok(SmtpSettings {
        host,
        port,
        credentials,
    })
}
