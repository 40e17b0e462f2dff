//! Username/password login endpoint.

use crate::error::LoginResult;
use crate::handlers::finish;
use crate::models::{LoginForm, LoginQuery};
use crate::router::LoginFlowState;
use crate::services;
use axum::{
    extract::{Form, Query, State},
    http::HeaderMap,
    response::Response,
};

/// GET /login
///
/// Renders the login form for an in-flight attempt. Idempotent: no state is
/// re-persisted and no cookies are written.
#[utoipa::path(
    get,
    path = "/login",
    params(
        ("AuthState" = Option<String>, Query, description = "Opaque login-attempt state identifier"),
    ),
    responses(
        (status = 200, description = "Login form rendered"),
        (status = 400, description = "Missing, malformed, unknown, or expired state", body = crate::error::ErrorResponse),
    ),
    tag = "login"
)]
pub async fn show_login(
    State(state): State<LoginFlowState>,
    Query(query): Query<LoginQuery>,
    headers: HeaderMap,
) -> LoginResult<Response> {
    let output =
        services::run_userpass(&state, query.auth_state.as_deref(), None, &headers).await?;
    Ok(finish(&state, output))
}

/// POST /login
///
/// Submits the form. With credentials present this verifies them; with both
/// fields empty it re-renders the form.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = String, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered, possibly with an inline error"),
        (status = 303, description = "Verification succeeded, protocol continuation issued"),
        (status = 400, description = "Missing, malformed, unknown, or expired state", body = crate::error::ErrorResponse),
    ),
    tag = "login"
)]
pub async fn submit_login(
    State(state): State<LoginFlowState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> LoginResult<Response> {
    let output =
        services::run_userpass(&state, form.auth_state.as_deref(), Some(&form), &headers).await?;
    Ok(finish(&state, output))
}
