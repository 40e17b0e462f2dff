//! View model handed to the external template renderer.

use crate::source::{LoginLink, Organization};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Everything the login template needs for one render.
///
/// The flow assembles this; rendering it is an external collaborator's job.
/// `auth_state` always points at the identifier the next submission must
/// round-trip — after a failed verification that is a *new* id, not the one
/// the request arrived with.
#[derive(Debug, Clone, Serialize)]
pub struct LoginView {
    /// State identifier to embed in the form.
    pub auth_state: String,
    /// Resolved username to pre-fill.
    pub username: String,
    /// When true the username is policy-fixed and the input is suppressed.
    pub forced_username: bool,
    pub remember_username_enabled: bool,
    /// Pre-checked iff the username cookie is present on this request.
    pub remember_username_checked: bool,
    pub remember_me_enabled: bool,
    /// Default mirrors the sticky flag already carried in state.
    pub remember_me_checked: bool,
    /// Alternate ways into this login source.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub login_links: Vec<LoginLink>,
    /// Failure code from the previous round, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Display parameters accompanying the failure code.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub error_params: HashMap<String, String>,
    /// Static catalog of all known failure codes, for client-side lookup.
    pub error_catalog: BTreeMap<&'static str, &'static str>,
    /// Passthrough display data from the upstream protocol layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sp_metadata: Option<serde_json::Value>,
    /// Organization variant only: the selectable organizations, when
    /// selection is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<Organization>>,
    /// Organization variant only: the currently resolved selection
    /// (empty string when nothing is selected yet).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_organization: Option<String>,
    pub remember_organization_enabled: bool,
    /// Pre-checked iff the organization cookie is present on this request.
    pub remember_organization_checked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error_catalog;

    fn view() -> LoginView {
        LoginView {
            auth_state: "abc".to_string(),
            username: "alice".to_string(),
            forced_username: false,
            remember_username_enabled: true,
            remember_username_checked: false,
            remember_me_enabled: false,
            remember_me_checked: false,
            login_links: Vec::new(),
            error_code: None,
            error_params: HashMap::new(),
            error_catalog: error_catalog::catalog(),
            sp_metadata: None,
            organizations: None,
            selected_organization: None,
            remember_organization_enabled: false,
            remember_organization_checked: false,
        }
    }

    #[test]
    fn test_plain_view_omits_org_section() {
        let json = serde_json::to_value(view()).unwrap();
        assert!(json.get("organizations").is_none());
        assert!(json.get("selected_organization").is_none());
        assert!(json.get("error_code").is_none());
        assert!(json.get("error_catalog").is_some());
    }

    #[test]
    fn test_error_fields_serialized_when_present() {
        let mut v = view();
        v.error_code = Some("WRONGUSERPASS".to_string());
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["error_code"], "WRONGUSERPASS");
    }
}
