//! Same-origin guard for `/api`.
//!
//! The API listens on loopback only. A request is refused when its `Host`
//! is not a loopback name (DNS rebinding) or when it carries an `Origin`
//! other than the `Host` it was sent to (another site's page).

use axum::extract::Request;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use super::error::ApiError;

pub async fn same_origin_only(request: Request, next: Next) -> Result<Response, ApiError> {
    if let Err(reason) = check(request.headers()) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = %reason,
            "Rejected cross-origin API request"
        );
        return Err(ApiError::Forbidden(reason));
    }
    Ok(next.run(request).await)
}

fn check(headers: &HeaderMap) -> Result<(), String> {
    let host = match headers.get(header::HOST) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| "malformed host header".to_string())?,
        ),
        None => None,
    };
    if let Some(host) = host {
        if !is_loopback_host(host) {
            return Err(format!("host not allowed: {host}"));
        }
    }

    let Some(origin) = headers.get(header::ORIGIN) else {
        return Ok(());
    };
    let origin = String::from_utf8_lossy(origin.as_bytes());
    let authority = origin.split_once("://").map(|(_, rest)| rest);
    match (authority, host) {
        (Some(authority), Some(host)) if authority.eq_ignore_ascii_case(host) => Ok(()),
        (Some(authority), None) if is_loopback_host(authority) => Ok(()),
        _ => Err(format!("origin not allowed: {origin}")),
    }
}

/// `localhost`, `127.0.0.1` or `[::1]`, with or without a port.
fn is_loopback_host(host: &str) -> bool {
    let name = match host.find(']') {
        Some(end) => &host[..=end],
        None => host.split(':').next().unwrap_or(host),
    };
    matches!(
        name.to_ascii_lowercase().as_str(),
        "localhost" | "127.0.0.1" | "[::1]"
    )
}
