//! Interactive credential-collection flow for a federated identity provider.
//!
//! This crate drives the multi-round-trip conversation between a browser
//! and a configured credential source: render the login form, collect a
//! username/password (and optionally an organization selection), hand the
//! credentials to a pluggable verification backend, and either re-enter the
//! stage with an inline error or terminate it through the protocol
//! continuation.
//!
//! All per-attempt context travels as stage-tagged state persisted behind
//! [`state::StateStore`] and referenced by an opaque `AuthState` identifier
//! the browser round-trips. The store is append-only: every save issues a
//! fresh identifier, which is what keeps concurrent submissions against the
//! same attempt from racing on shared state.
//!
//! The embedding application supplies the template renderer, the protocol
//! continuation, and the configured sources, then mounts
//! [`router::login_router`].

pub mod config;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod source;
pub mod state;

pub use config::LoginConfig;
pub use error::{ErrorResponse, LoginError, LoginResult};
pub use models::{LoginForm, LoginQuery, LoginView};
pub use router::{login_router, LoginFlowState};
pub use services::{run_userpass, run_userpass_org, FlowOutput};
pub use source::{
    AuthFailure, AuthnOutcome, CredentialBackend, CredentialSource, LoginCompletion, LoginLink,
    LoginRenderer, Organization, OrganizationCredentialSource, PlainCredentialSource,
    SourceRegistry,
};
pub use state::{
    AuthStage, AuthnAttempt, InMemoryStateStore, PostgresStateStore, StateError, StateStore,
};
