//! Static catalog of credential-error messages.
//!
//! Failure codes raised by backends are opaque to the flow; the catalog
//! exists so the renderer (and client-side script) can resolve a code to a
//! display message without another round trip. Codes missing from the
//! catalog still render — the view carries the raw code and parameters.

use std::collections::BTreeMap;

/// All known credential-error codes and their display messages.
pub const ERROR_CATALOG: &[(&str, &str)] = &[
    ("WRONGUSERPASS", "Incorrect username or password."),
    (
        "WRONGORG",
        "The selected organization is not valid for this account.",
    ),
    ("LOCKED", "This account is locked. Try again later."),
    (
        "NOACCESS",
        "This account does not have access to this service.",
    ),
    (
        "EXPIREDPASSWORD",
        "Your password has expired and must be changed.",
    ),
];

/// Look up the message for a code.
#[must_use]
pub fn lookup(code: &str) -> Option<&'static str> {
    ERROR_CATALOG
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, message)| *message)
}

/// The catalog as an ordered map, for embedding in the view model.
#[must_use]
pub fn catalog() -> BTreeMap<&'static str, &'static str> {
    ERROR_CATALOG.iter().copied().collect()
}
