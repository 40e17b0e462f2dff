//! Login-flow configuration types.

use serde::Deserialize;

use crate::services::remember_policy::REMEMBER_TTL_SECONDS;
use crate::state::DEFAULT_STATE_TTL_SECONDS;

/// Configuration for the credential-collection flow.
///
/// Loading (file/env wiring) is the embedding application's concern; this
/// is only the deserializable shape with sensible defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    /// TTL for persisted login-attempt state, in seconds.
    #[serde(default = "default_state_ttl")]
    pub state_ttl_secs: i64,
    /// Lifetime of an opted-in remember cookie, in seconds.
    #[serde(default = "default_remember_ttl")]
    pub remember_ttl_secs: i64,
    /// Whether the serving context supports `SameSite=None` cookies.
    /// When false the attribute is omitted entirely.
    #[serde(default)]
    pub same_site_none: bool,
}

fn default_state_ttl() -> i64 {
    DEFAULT_STATE_TTL_SECONDS
}

fn default_remember_ttl() -> i64 {
    REMEMBER_TTL_SECONDS
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            state_ttl_secs: default_state_ttl(),
            remember_ttl_secs: default_remember_ttl(),
            same_site_none: false,
        }
    }
}
