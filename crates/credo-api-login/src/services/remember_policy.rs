//! Remember-cookie policy
//!
//! Decides, per remembered field, what expiry this round's cookie rewrite
//! carries. Opting in yields a long-lived cookie; opting out (or leaving
//! the checkbox absent) yields an expiry strictly in the past, which is how
//! a previously remembered value gets cleared. The policy only runs on the
//! submission branch of the flow — re-rendering a form never touches these
//! cookies — and only when the feature is enabled for the source.

use chrono::{DateTime, Duration, Utc};

/// Cookie lifetime for an opted-in remembered field (one year).
pub const REMEMBER_TTL_SECONDS: i64 = 31_536_000;

/// Past offset used to clear a remembered field.
pub const CLEAR_OFFSET_SECONDS: i64 = 86_400;

/// Outcome of a remember-policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RememberDecision {
    /// Signed offset from now for the cookie's `Expires` attribute.
    /// Negative means the cookie is being cleared.
    pub expires_in_seconds: i64,
}

impl RememberDecision {
    /// Whether this decision clears the cookie rather than setting it.
    #[must_use]
    pub fn is_clear(self) -> bool {
        self.expires_in_seconds < 0
    }

    /// Absolute expiry computed from now.
    #[must_use]
    pub fn expires_at(self) -> DateTime<Utc> {
        Utc::now() + Duration::seconds(self.expires_in_seconds)
    }
}

/// Decide the cookie action for one remembered field.
///
/// Callers must gate on the source's feature flag first; a disabled feature
/// means no cookie action at all, not a clear. The opt-in lifetime comes
/// from configuration ([`crate::config::LoginConfig::remember_ttl_secs`]).
#[must_use]
pub fn decide(checkbox_checked: bool, remember_ttl_seconds: i64) -> RememberDecision {
    if checkbox_checked {
        RememberDecision {
            expires_in_seconds: remember_ttl_seconds,
        }
    } else {
        RememberDecision {
            expires_in_seconds: -CLEAR_OFFSET_SECONDS,
        }
    }
}
