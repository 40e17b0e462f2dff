//! Login-flow orchestration
//!
//! One request of the multi-step credential-collection flow: load the
//! stage-tagged state, reconcile it with whatever was submitted, either
//! re-enter the same stage (re-rendering the form, possibly with an
//! error) or terminate it by handing a verified outcome to the protocol
//! continuation. Shared by the plain and the organization variants, which
//! differ only in the stage tag, the inserted organization-listing step,
//! and which remember policies apply.
//!
//! The functions here are transport-light on purpose: they consume the
//! parsed request pieces and produce a [`FlowOutput`], leaving response
//! construction (renderer, continuation, cookie headers) to the handlers.

use crate::cookies::{
    create_remember_cookie, extract_cookie, remember_cookie_name, ORGANIZATION_FIELD,
    USERNAME_FIELD,
};
use crate::error::{LoginError, LoginResult};
use crate::models::{error_catalog, LoginForm, LoginView};
use crate::router::LoginFlowState;
use crate::services::{credential_extractor, remember_policy};
use crate::source::{AuthnOutcome, CredentialBackend};
use crate::state::{AuthStage, AuthnAttempt};
use axum::http::HeaderMap;
use credo_core::StateId;
use std::collections::HashMap;

/// What one flow execution produced.
#[derive(Debug)]
pub enum FlowOutput {
    /// Re-enter the stage: render the form with this view model, and set
    /// these cookies (empty on the render-only branch).
    Render {
        view: LoginView,
        cookies: Vec<String>,
    },
    /// Stage terminated: hand the outcome to the protocol continuation.
    Success {
        state_id: StateId,
        return_url: Option<String>,
        outcome: AuthnOutcome,
        cookies: Vec<String>,
    },
}

/// Parse and validate the inbound `AuthState` parameter.
///
/// Runs before any store or backend call: a request without a state
/// identifier is rejected without side effects.
fn parse_auth_state(auth_state: Option<&str>) -> LoginResult<StateId> {
    let raw = auth_state.ok_or(LoginError::MissingAuthState)?;
    raw.parse()
        .map_err(|_| LoginError::InvalidAuthState(raw.to_string()))
}

/// Whether this round counts as a credential submission.
///
/// Presence alone is not enough: a POST with empty username and empty
/// password re-renders the form instead of invoking the backend.
fn credentials_submitted(form: Option<&LoginForm>) -> bool {
    form.is_some_and(|f| {
        f.username.as_deref().is_some_and(|u| !u.is_empty())
            || f.password.as_deref().is_some_and(|p| !p.is_empty())
    })
}

/// One execution of the plain username/password flow.
pub async fn run_userpass(
    state: &LoginFlowState,
    auth_state: Option<&str>,
    form: Option<&LoginForm>,
    headers: &HeaderMap,
) -> LoginResult<FlowOutput> {
    let state_id = parse_auth_state(auth_state)?;
    let mut attempt = state.store.load(state_id, AuthStage::UserPass).await?;

    let source = match state.registry.get(&attempt.source_id) {
        Some(CredentialBackend::Plain(source)) => source.clone(),
        Some(CredentialBackend::Organization(_)) => {
            return Err(LoginError::SourceKindMismatch {
                source_id: attempt.source_id.clone(),
                expected: "username/password",
            })
        }
        None => return Err(LoginError::UnknownSource(attempt.source_id.clone())),
    };

    let remember_username = source.remember_username_enabled();
    let username_cookie_name = remember_cookie_name(source.id(), USERNAME_FIELD);
    let username_cookie = extract_cookie(headers, &username_cookie_name);

    let submitted_username = form.and_then(|f| f.username.as_deref());
    let mut username = credential_extractor::resolve_field(
        submitted_username,
        username_cookie.as_deref(),
        remember_username,
        attempt.cached_username.as_deref(),
    );
    if let Some(forced) = &attempt.forced_username {
        username = forced.clone();
    }
    let password = credential_extractor::resolve_password(form.and_then(|f| f.password.as_deref()));

    if !credentials_submitted(form) {
        // Render-only round: no re-save, no cookie writes
        let view = build_view(
            state_id,
            &attempt,
            username,
            remember_username,
            username_cookie.is_some(),
            source.remember_me_enabled(),
            source.login_links(),
        );
        return Ok(FlowOutput::Render {
            view,
            cookies: Vec::new(),
        });
    }

    let mut cookies = Vec::new();
    if remember_username {
        let decision = remember_policy::decide(
            form.is_some_and(LoginForm::remember_username_checked),
            state.config.remember_ttl_secs,
        );
        let value = if decision.is_clear() { "" } else { &username };
        cookies.push(create_remember_cookie(
            &username_cookie_name,
            value,
            decision.expires_at(),
            state.config.same_site_none,
        ));
    }

    // Sticky remember-me upgrade: re-persist under the same stage and use
    // the new identifier for the verification call and everything after
    let mut current_id = state_id;
    if source.remember_me_enabled()
        && form.is_some_and(LoginForm::remember_me_checked)
        && !attempt.remember_me
    {
        attempt.remember_me = true;
        current_id = state.store.save(&attempt, AuthStage::UserPass).await?;
        tracing::info!(
            state_id = %current_id,
            source_id = %attempt.source_id,
            "Remember-me opt-in persisted, state re-issued"
        );
    }

    // A new attempt begins: a carried error has been surfaced and is done
    attempt.clear_error();

    match source.verify(current_id, &username, &password).await {
        Ok(outcome) => {
            tracing::info!(
                state_id = %current_id,
                source_id = %attempt.source_id,
                "Credential verification succeeded"
            );
            Ok(FlowOutput::Success {
                state_id: current_id,
                return_url: attempt.return_url.clone(),
                outcome,
                cookies,
            })
        }
        Err(failure) => {
            attempt.set_error(failure.code.clone(), failure.params);
            let new_id = state.store.save(&attempt, AuthStage::UserPass).await?;
            tracing::info!(
                state_id = %new_id,
                source_id = %attempt.source_id,
                code = %failure.code,
                "Credential verification failed, state re-issued with error"
            );
            let view = build_view(
                new_id,
                &attempt,
                username,
                remember_username,
                username_cookie.is_some(),
                source.remember_me_enabled(),
                source.login_links(),
            );
            Ok(FlowOutput::Render { view, cookies })
        }
    }
}

/// One execution of the username/password/organization flow.
pub async fn run_userpass_org(
    state: &LoginFlowState,
    auth_state: Option<&str>,
    form: Option<&LoginForm>,
    headers: &HeaderMap,
) -> LoginResult<FlowOutput> {
    let state_id = parse_auth_state(auth_state)?;
    let mut attempt = state.store.load(state_id, AuthStage::UserPassOrg).await?;

    let source = match state.registry.get(&attempt.source_id) {
        Some(CredentialBackend::Organization(source)) => source.clone(),
        Some(CredentialBackend::Plain(_)) => {
            return Err(LoginError::SourceKindMismatch {
                source_id: attempt.source_id.clone(),
                expected: "organization",
            })
        }
        None => return Err(LoginError::UnknownSource(attempt.source_id.clone())),
    };

    // Inserted step: list organizations before resolving credentials.
    // None means no selection is required for this attempt.
    let organizations = source.organizations(state_id).await;

    let remember_username = source.remember_username_enabled();
    let remember_organization = source.remember_organization_enabled();
    let username_cookie_name = remember_cookie_name(source.id(), USERNAME_FIELD);
    let organization_cookie_name = remember_cookie_name(source.id(), ORGANIZATION_FIELD);
    let username_cookie = extract_cookie(headers, &username_cookie_name);
    let organization_cookie = extract_cookie(headers, &organization_cookie_name);

    let mut username = credential_extractor::resolve_field(
        form.and_then(|f| f.username.as_deref()),
        username_cookie.as_deref(),
        remember_username,
        attempt.cached_username.as_deref(),
    );
    if let Some(forced) = &attempt.forced_username {
        username = forced.clone();
    }
    let password = credential_extractor::resolve_password(form.and_then(|f| f.password.as_deref()));
    let organization = credential_extractor::resolve_field(
        form.and_then(|f| f.organization.as_deref()),
        organization_cookie.as_deref(),
        remember_organization,
        attempt.cached_organization.as_deref(),
    );

    // Verification additionally requires a resolved organization whenever
    // selection is required for this attempt
    let selection_satisfied = organizations.is_none() || !organization.is_empty();
    let verifying = credentials_submitted(form) && selection_satisfied;

    if !verifying {
        let mut view = build_view(
            state_id,
            &attempt,
            username,
            remember_username,
            username_cookie.is_some(),
            false,
            source.login_links(),
        );
        view.organizations = organizations;
        view.selected_organization = Some(organization);
        view.remember_organization_enabled = remember_organization;
        view.remember_organization_checked = organization_cookie.is_some();
        return Ok(FlowOutput::Render {
            view,
            cookies: Vec::new(),
        });
    }

    let mut cookies = Vec::new();
    if remember_username {
        let decision = remember_policy::decide(
            form.is_some_and(LoginForm::remember_username_checked),
            state.config.remember_ttl_secs,
        );
        let value = if decision.is_clear() { "" } else { &username };
        cookies.push(create_remember_cookie(
            &username_cookie_name,
            value,
            decision.expires_at(),
            state.config.same_site_none,
        ));
    }
    if remember_organization {
        let decision = remember_policy::decide(
            form.is_some_and(LoginForm::remember_organization_checked),
            state.config.remember_ttl_secs,
        );
        let value = if decision.is_clear() { "" } else { &organization };
        cookies.push(create_remember_cookie(
            &organization_cookie_name,
            value,
            decision.expires_at(),
            state.config.same_site_none,
        ));
    }

    attempt.clear_error();

    let selected = if organization.is_empty() {
        None
    } else {
        Some(organization.as_str())
    };
    match source
        .verify(state_id, &username, &password, selected)
        .await
    {
        Ok(outcome) => {
            tracing::info!(
                state_id = %state_id,
                source_id = %attempt.source_id,
                "Credential verification succeeded"
            );
            Ok(FlowOutput::Success {
                state_id,
                return_url: attempt.return_url.clone(),
                outcome,
                cookies,
            })
        }
        Err(failure) => {
            attempt.set_error(failure.code.clone(), failure.params);
            let new_id = state.store.save(&attempt, AuthStage::UserPassOrg).await?;
            tracing::info!(
                state_id = %new_id,
                source_id = %attempt.source_id,
                code = %failure.code,
                "Credential verification failed, state re-issued with error"
            );
            let mut view = build_view(
                new_id,
                &attempt,
                username,
                remember_username,
                username_cookie.is_some(),
                false,
                source.login_links(),
            );
            view.organizations = organizations;
            view.selected_organization = Some(organization);
            view.remember_organization_enabled = remember_organization;
            view.remember_organization_checked = organization_cookie.is_some();
            Ok(FlowOutput::Render { view, cookies })
        }
    }
}

/// Assemble the shared part of the view model.
fn build_view(
    state_id: StateId,
    attempt: &AuthnAttempt,
    username: String,
    remember_username_enabled: bool,
    username_cookie_present: bool,
    remember_me_enabled: bool,
    login_links: Vec<crate::source::LoginLink>,
) -> LoginView {
    let (error_code, error_params) = match &attempt.error {
        Some(error) => (Some(error.code.clone()), error.params.clone()),
        None => (None, HashMap::new()),
    };

    LoginView {
        auth_state: state_id.to_string(),
        username,
        forced_username: attempt.forced_username.is_some(),
        remember_username_enabled,
        remember_username_checked: username_cookie_present,
        remember_me_enabled,
        remember_me_checked: attempt.remember_me,
        login_links,
        error_code,
        error_params,
        error_catalog: error_catalog::catalog(),
        sp_metadata: attempt.sp_metadata.clone(),
        organizations: None,
        selected_organization: None,
        remember_organization_enabled: false,
        remember_organization_checked: false,
    }
}
