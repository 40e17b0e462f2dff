//! Authentication-state types for the credential-collection flow
//!
//! A login attempt's state survives several HTTP exchanges. It is persisted
//! under an opaque [`StateId`](credo_core::StateId) and tagged with the
//! [`AuthStage`] that wrote it, so that a state saved by one flow can never
//! be loaded by another.

use chrono::{DateTime, Duration, Utc};
use credo_core::SourceId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Default TTL for persisted login-attempt state (1 hour)
pub const DEFAULT_STATE_TTL_SECONDS: i64 = 3600;

/// Which flow a persisted state belongs to.
///
/// A state loaded for stage S must have been saved under stage S; a mismatch
/// is a fatal flow error, not something the user can retry past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthStage {
    /// Plain username/password collection.
    UserPass,
    /// Username/password plus organization selection.
    UserPassOrg,
}

impl AuthStage {
    /// Stable string form used for persistence.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserPass => "userpass",
            Self::UserPassOrg => "userpass-org",
        }
    }

    /// Parse the persisted string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "userpass" => Some(Self::UserPass),
            "userpass-org" => Some(Self::UserPassOrg),
            _ => None,
        }
    }
}

impl Display for AuthStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inline credential error carried in state between rounds.
///
/// The `code` is opaque to the flow; it is only looked up against the static
/// message catalog when the form is re-rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowError {
    /// Machine-readable failure code (e.g. `WRONGUSERPASS`).
    pub code: String,
    /// Display parameters for the message template.
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// One logical login attempt, threaded through multiple exchanges.
///
/// Created by the upstream protocol layer before the flow runs. The flow
/// mutates it only to attach a credential error or to set the sticky
/// remember-me flag, and every mutation is persisted under a fresh id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthnAttempt {
    /// Which configured backend instance governs this attempt.
    pub source_id: SourceId,
    /// Policy-fixed username; when present the user cannot edit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_username: Option<String>,
    /// Username carried over from a prior round (e.g. SSO request context).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_username: Option<String>,
    /// Organization carried over from a prior round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_organization: Option<String>,
    /// Sticky long-lived-session opt-in; once set it survives re-saves.
    #[serde(default)]
    pub remember_me: bool,
    /// Error from the previous verification attempt, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FlowError>,
    /// Passthrough display data for the renderer; never interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_metadata: Option<serde_json::Value>,
    /// Where the continuation sends the browser after success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

impl AuthnAttempt {
    /// Create a fresh attempt bound to a source instance.
    #[must_use]
    pub fn new(source_id: SourceId) -> Self {
        Self {
            source_id,
            forced_username: None,
            cached_username: None,
            cached_organization: None,
            remember_me: false,
            error: None,
            sp_metadata: None,
            return_url: None,
        }
    }

    /// Attach a credential error, replacing any carried one.
    pub fn set_error(&mut self, code: impl Into<String>, params: HashMap<String, String>) {
        self.error = Some(FlowError {
            code: code.into(),
            params,
        });
    }

    /// Drop the carried error. Called when a new verification attempt
    /// begins, so a stale failure is never re-surfaced after a retry.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// State-store errors
#[derive(Debug, Error, Clone)]
pub enum StateError {
    /// State id unknown (never saved, or already expired and cleaned up)
    #[error("Authentication state not found: {0}")]
    NotFound(String),

    /// State exists but its TTL has passed
    #[error("Authentication state expired: {state_id} (expired at {expired_at})")]
    Expired {
        state_id: String,
        expired_at: DateTime<Utc>,
    },

    /// State was saved by a different flow than the one loading it
    #[error("Authentication state stage mismatch: expected {expected}, found {actual}")]
    StageMismatch {
        expected: AuthStage,
        actual: AuthStage,
    },

    /// Underlying storage failure
    #[error("State storage error: {0}")]
    Storage(String),
}

/// A persisted state record: the attempt plus its envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    /// The stage that saved this record.
    pub stage: AuthStage,
    /// The attempt payload.
    pub attempt: AuthnAttempt,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
    /// When the record stops being loadable.
    pub expires_at: DateTime<Utc>,
}

impl StateRecord {
    /// Wrap an attempt for persistence with the given TTL.
    #[must_use]
    pub fn new(stage: AuthStage, attempt: AuthnAttempt, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            stage,
            attempt,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds),
        }
    }

    /// Check whether this record's TTL has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
