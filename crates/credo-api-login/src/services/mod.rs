//! Flow services: credential resolution, remember policy, orchestration.

pub mod credential_extractor;
pub mod login_flow;
pub mod remember_policy;

pub use login_flow::{run_userpass, run_userpass_org, FlowOutput};
