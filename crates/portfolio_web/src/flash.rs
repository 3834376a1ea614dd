//! Cookie side of the one-time notice carrier.
//!
//! The cookie only holds an opaque UUID token; notice text stays server-side
//! in `flash_notices`.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use portfolio_core::repo::flash_repo::FLASH_TTL_MS;
use uuid::Uuid;

pub const FLASH_COOKIE: &str = "portfolio_flash";
pub const CLEAR_FLASH_COOKIE: &str = "portfolio_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

/// Fresh unguessable token for a new notice.
pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

/// `Set-Cookie` value pointing the browser at `token`.
pub fn flash_cookie(token: &str) -> String {
    format!(
        "{FLASH_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        FLASH_TTL_MS / 1000
    )
}

/// Extracts a well-formed flash token from the request cookies.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == FLASH_COOKIE).then(|| value.trim().to_string())
        })
        .find(|value| Uuid::parse_str(value).is_ok())
}
