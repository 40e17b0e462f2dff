//! Router and shared handler state for the login endpoints.

use crate::config::LoginConfig;
use crate::handlers::{login, org_login};
use crate::source::{LoginCompletion, LoginRenderer, SourceRegistry};
use crate::state::StateStore;
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;

/// Shared state for the login handlers.
///
/// The embedding application supplies the store, the configured sources,
/// and the two external collaborators (template renderer and protocol
/// continuation).
#[derive(Clone)]
pub struct LoginFlowState {
    pub store: Arc<dyn StateStore>,
    pub registry: Arc<SourceRegistry>,
    pub renderer: Arc<dyn LoginRenderer>,
    pub completion: Arc<dyn LoginCompletion>,
    pub config: LoginConfig,
}

/// Build the login router.
///
/// Mounts the plain flow at `/login` and the organization variant at
/// `/login/org`, both accepting GET (render) and POST (submit).
pub fn login_router(state: LoginFlowState) -> Router {
    Router::new()
        .route("/login", get(login::show_login).post(login::submit_login))
        .route(
            "/login/org",
            get(org_login::show_login).post(org_login::submit_login),
        )
        .with_state(state)
}
