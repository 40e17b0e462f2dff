//! Remember-me cookie surface for the login flow.
//!
//! The browser owns these cookies; the flow only reads and rewrites them.
//! Names are `{source_id}-username` and `{source_id}-organization`, so two
//! source instances never clobber each other's remembered values.
//!
//! There is no explicit delete: clearing a remembered value is expressed as
//! rewriting the cookie with an expiry strictly in the past. That idiom is
//! load-bearing (it is the only deletion mechanism for client-held remember
//! state) and must not be replaced.

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};
use credo_core::SourceId;

/// Field suffix for the remembered username cookie.
pub const USERNAME_FIELD: &str = "username";

/// Field suffix for the remembered organization cookie.
pub const ORGANIZATION_FIELD: &str = "organization";

/// Well-known cookie name for a remembered field of a source instance.
#[must_use]
pub fn remember_cookie_name(source_id: &SourceId, field: &str) -> String {
    format!("{source_id}-{field}")
}

/// Format a Set-Cookie value for a remembered field.
///
/// Attributes are fixed: site-root path, no domain, `HttpOnly`, an absolute
/// `Expires` date, and `SameSite=None` only when the serving context
/// supports it. The `Secure` flag is left to the transport.
///
/// The value is percent-encoded: a remembered username is user-controlled
/// and must not be able to smuggle separators or attributes into the
/// header line.
#[must_use]
pub fn create_remember_cookie(
    name: &str,
    value: &str,
    expires_at: DateTime<Utc>,
    same_site_none: bool,
) -> String {
    let value = urlencoding::encode(value);
    let same_site = if same_site_none { "; SameSite=None" } else { "" };
    let expires = expires_at.format("%a, %d %b %Y %H:%M:%S GMT");
    format!("{name}={value}; Path=/; HttpOnly; Expires={expires}{same_site}")
}

/// Extract a cookie value from request headers by name.
///
/// Values are percent-decoded, mirroring [`create_remember_cookie`]. A
/// value that fails to decode is treated as absent.
#[must_use]
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get(axum::http::header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    // Parse cookie string (format: "name1=value1; name2=value2")
    for part in cookie_str.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(&format!("{name}=")) {
            return urlencoding::decode(value.trim())
                .ok()
                .map(|decoded| decoded.into_owned());
        }
    }

    None
}

/// Append a Set-Cookie header to a response header map.
///
/// Uses append, not insert: the organization variant writes two remember
/// cookies on the same response.
pub fn append_set_cookie(headers: &mut HeaderMap, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        headers.append(SET_COOKIE, value);
    }
}
