//! Inbound request types for the login endpoints.

use serde::Deserialize;

/// Literal a checkbox field must equal to count as checked.
const CHECKBOX_CHECKED: &str = "Yes";

/// Query parameters for GET entry into the flow.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginQuery {
    /// Opaque state identifier issued by the upstream protocol layer.
    #[serde(rename = "AuthState")]
    pub auth_state: Option<String>,
}

/// Form fields for a login submission.
///
/// All fields are optional: a POST without credentials is a re-render, not
/// a verification attempt. Checkbox fields carry the literal `"Yes"` when
/// checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Opaque state identifier, round-tripped through the form.
    #[serde(rename = "AuthState")]
    pub auth_state: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub organization: Option<String>,
    pub remember_username: Option<String>,
    pub remember_me: Option<String>,
    pub remember_organization: Option<String>,
}

impl LoginForm {
    fn checked(value: Option<&str>) -> bool {
        value == Some(CHECKBOX_CHECKED)
    }

    /// Whether the remember-username checkbox was checked.
    #[must_use]
    pub fn remember_username_checked(&self) -> bool {
        Self::checked(self.remember_username.as_deref())
    }

    /// Whether the remember-me checkbox was checked.
    #[must_use]
    pub fn remember_me_checked(&self) -> bool {
        Self::checked(self.remember_me.as_deref())
    }

    /// Whether the remember-organization checkbox was checked.
    #[must_use]
    pub fn remember_organization_checked(&self) -> bool {
        Self::checked(self.remember_organization.as_deref())
    }
}
