//! Credential-source contracts
//!
//! Capability-based trait definitions for the pluggable verification
//! backends the flow drives. The flow never verifies a password itself; it
//! resolves a configured source instance by id and hands it the collected
//! credentials. Two closed variants exist: plain username/password sources
//! and sources that additionally require an organization selection.

pub mod registry;

use async_trait::async_trait;
use axum::response::Response;
use credo_core::{SourceId, StateId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use registry::{CredentialBackend, SourceRegistry};

/// Typed authentication failure raised by a backend.
///
/// The code is opaque to the flow; it is attached to the re-persisted state
/// and looked up against the static message catalog at render time. Nothing
/// here distinguishes "wrong password" from any other backend reason.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("Authentication failed: {code}")]
pub struct AuthFailure {
    /// Machine-readable failure code.
    pub code: String,
    /// Display parameters for the message template.
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl AuthFailure {
    /// Failure with no display parameters.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            params: HashMap::new(),
        }
    }

    /// Failure with display parameters.
    #[must_use]
    pub fn with_params(code: impl Into<String>, params: HashMap<String, String>) -> Self {
        Self {
            code: code.into(),
            params,
        }
    }
}

/// Successful verification result, handed to the protocol continuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthnOutcome {
    /// Attributes asserted for the authenticated user.
    pub attributes: HashMap<String, Vec<String>>,
}

/// An organization a user may select during login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Stable organization id submitted back by the form.
    pub id: String,
    /// Human-readable name shown in the selector.
    pub display_name: String,
}

/// An alternate way into the login page (e.g. a federated IdP link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginLink {
    pub href: String,
    pub text: String,
}

/// Base trait for all credential sources.
pub trait CredentialSource: Send + Sync {
    /// The configured instance id. Prefixes this source's cookie names.
    fn id(&self) -> &SourceId;

    /// Whether the remember-username cookie feature is enabled.
    fn remember_username_enabled(&self) -> bool {
        false
    }

    /// Alternate login links to offer alongside the form.
    fn login_links(&self) -> Vec<LoginLink> {
        Vec::new()
    }
}

/// Capability for plain username/password verification.
#[async_trait]
pub trait PlainCredentialSource: CredentialSource {
    /// Whether the sticky remember-me flag may be offered.
    fn remember_me_enabled(&self) -> bool {
        false
    }

    /// Verify the collected credentials.
    ///
    /// Success terminates the collection stage; the outcome is handed to
    /// the protocol continuation. A typed failure is attached to a freshly
    /// persisted state and re-displayed inline.
    async fn verify(
        &self,
        state_id: StateId,
        username: &str,
        password: &str,
    ) -> Result<AuthnOutcome, AuthFailure>;
}

/// Capability for username/password/organization verification.
#[async_trait]
pub trait OrganizationCredentialSource: CredentialSource {
    /// Whether the remember-organization cookie feature is enabled.
    fn remember_organization_enabled(&self) -> bool {
        false
    }

    /// List the organizations selectable for this attempt.
    ///
    /// `None` means no selection is required and verification may proceed
    /// without an organization.
    async fn organizations(&self, state_id: StateId) -> Option<Vec<Organization>>;

    /// Verify the collected credentials and organization selection.
    async fn verify(
        &self,
        state_id: StateId,
        username: &str,
        password: &str,
        organization: Option<&str>,
    ) -> Result<AuthnOutcome, AuthFailure>;
}

/// Out-of-scope protocol continuation, consumed as an interface.
///
/// Invoked exactly once per attempt, after a successful verification. What
/// it does (build an assertion, redirect to the SP, ...) is the calling
/// protocol layer's concern.
pub trait LoginCompletion: Send + Sync {
    fn complete(&self, state_id: StateId, return_url: Option<&str>, outcome: AuthnOutcome)
        -> Response;
}

/// Out-of-scope template engine, consumed as an interface.
///
/// Receives the assembled view model and produces the response body.
pub trait LoginRenderer: Send + Sync {
    fn render(&self, view: &crate::models::LoginView) -> Response;
}
