//! Username/password/organization login endpoint.

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

/// GET /login/org
///
/// Renders the organization login form, including the organization selector
/// when the source requires a selection for this attempt.
#[utoipa::path(
    get,
    path = "/login/org",
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
        services::run_userpass_org(&state, query.auth_state.as_deref(), None, &headers).await?;
    Ok(finish(&state, output))
}

/// POST /login/org
///
/// Submits the form. Verification requires credentials and, when the source
/// lists organizations, a resolved selection; otherwise the form is
/// re-rendered.
#[utoipa::path(
    post,
    path = "/login/org",
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
        services::run_userpass_org(&state, form.auth_state.as_deref(), Some(&form), &headers)
            .await?;
    Ok(finish(&state, output))
}
