//! Request header helpers

use crate::services::bearer_token;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Header carrying the original file name of a raw upload
pub const FILE_NAME_HEADER: &str = "x-file-name";

/// Key used to rate limit a caller
///
/// First entry of `x-forwarded-for`, then `x-real-ip`, then `unknown`.
pub fn client_key(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .unwrap_or("unknown")
        .to_string()
}

/// Bearer credential from the `Authorization` header
pub fn credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
}

/// Original file name of a raw upload
pub fn upload_name(headers: &HeaderMap) -> &str {
    headers
        .get(FILE_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("upload")
}
