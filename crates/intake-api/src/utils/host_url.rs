//! Base URL that public file links are built on

use axum::http::{header, HeaderMap, Uri};
use intake_core::Config;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// `PUBLIC_BASE_URL` when configured, otherwise `{scheme}://{authority}` of the request.
///
/// Scheme comes from `X-Forwarded-Proto` (default `http`). Authority comes from the
/// `Host` header, then the request URI, then `localhost:{port}`.
pub fn request_host_url(config: &Config, headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(base) = config.public_base_url() {
        return base.trim_end_matches('/').to_string();
    }

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");

    let authority = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| format!("localhost:{}", config.server_port()));

    format!("{}://{}", scheme, authority)
}
