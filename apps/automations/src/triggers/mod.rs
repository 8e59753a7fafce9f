// Trigger adapter: the record store's automations POST the ID of the record
// that changed, and the matching automation runs against it.

pub mod handlers;

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::config::Config;
use crate::errors::AppError;

/// Checks the bearer token when `TRIGGER_TOKEN` is configured.
pub fn authorize(config: &Config, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = config.trigger_token.as_deref() else {
        return Ok(());
    };
    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}
