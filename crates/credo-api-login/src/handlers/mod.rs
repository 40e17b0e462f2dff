//! HTTP handlers for the login endpoints.

pub mod login;
pub mod org_login;

use crate::cookies::append_set_cookie;
use crate::router::LoginFlowState;
use crate::services::FlowOutput;
use axum::response::Response;

/// Turn a flow output into an HTTP response.
///
/// Render hands the view to the configured renderer; success hands the
/// outcome to the protocol continuation. Either way the decided remember
/// cookies are appended to whatever response comes back.
pub(crate) fn finish(state: &LoginFlowState, output: FlowOutput) -> Response {
    match output {
        FlowOutput::Render { view, cookies } => {
            let mut response = state.renderer.render(&view);
            for cookie in &cookies {
                append_set_cookie(response.headers_mut(), cookie);
            }
            response
        }
        FlowOutput::Success {
            state_id,
            return_url,
            outcome,
            cookies,
        } => {
            let mut response = state
                .completion
                .complete(state_id, return_url.as_deref(), outcome);
            for cookie in &cookies {
                append_set_cookie(response.headers_mut(), cookie);
            }
            response
        }
    }
}
