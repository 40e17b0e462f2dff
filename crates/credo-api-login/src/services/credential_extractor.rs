//! Effective-credential resolution
//!
//! Derives the value of a login-form field for the current request from
//! three ranked sources: the submitted form value, the field's remember
//! cookie, and the value cached in the attempt state. Pure functions, no
//! side effects.

/// Resolve a remembered field (username, organization).
///
/// Precedence, first match wins:
/// 1. a submitted form value — presence, not truthiness: an explicitly
///    submitted empty string wins, so a user can blank out a pre-filled
///    field;
/// 2. the remember cookie, but only when the feature is enabled for this
///    source;
/// 3. the value cached in state;
/// 4. empty string.
#[must_use]
pub fn resolve_field(
    submitted: Option<&str>,
    cookie: Option<&str>,
    remember_enabled: bool,
    cached: Option<&str>,
) -> String {
    if let Some(value) = submitted {
        return value.to_string();
    }
    if remember_enabled {
        if let Some(value) = cookie {
            return value.to_string();
        }
    }
    cached.unwrap_or_default().to_string()
}

/// Resolve the password: request-only, no remember or cache path.
#[must_use]
pub fn resolve_password(submitted: Option<&str>) -> String {
    submitted.unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_wins() {
        let value = resolve_field(Some("alice"), Some("bob"), true, Some("carol"));
        assert_eq!(value, "alice");
    }

    #[test]
    fn test_submitted_empty_still_wins() {
        // Presence triggers the branch: blanking out a field must stick
        let value = resolve_field(Some(""), Some("bob"), true, Some("carol"));
        assert_eq!(value, "");
    }

    #[test]
    fn test_cookie_when_enabled() {
        let value = resolve_field(None, Some("bob"), true, Some("carol"));
        assert_eq!(value, "bob");
    }

    #[test]
    fn test_cookie_ignored_when_disabled() {
        let value = resolve_field(None, Some("bob"), false, Some("carol"));
        assert_eq!(value, "carol");
    }

    #[test]
    fn test_cached_fallback() {
        let value = resolve_field(None, None, true, Some("carol"));
        assert_eq!(value, "carol");
    }

    #[test]
    fn test_default_empty() {
        assert_eq!(resolve_field(None, None, true, None), "");
        assert_eq!(resolve_field(None, None, false, None), "");
    }

    #[test]
    fn test_password_request_only() {
        assert_eq!(resolve_password(Some("hunter2")), "hunter2");
        assert_eq!(resolve_password(None), "");
    }
}
