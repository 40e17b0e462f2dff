//! Strongly Typed Identifiers
//!
//! Type-safe identifier types for credo, using the newtype pattern so that
//! the different kinds of identifiers flowing through the login machinery
//! cannot be swapped for one another at compile time.
//!
//! # Example
//!
//! ```
//! use credo_core::{SourceId, StateId};
//!
//! let state = StateId::new();
//!
//! // Type safety: cannot pass a SourceId where a StateId is expected
//! fn requires_state(id: StateId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_state(state);
//! let source = SourceId::from("example-userpass");
//! assert_eq!(source.as_str(), "example-userpass");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed UUID-backed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Strongly typed identifier for a persisted authentication state.
    ///
    /// Every save of a login attempt's state issues a fresh `StateId`; the
    /// previous identifier becomes stale. Treat a `StateId` as a one-shot
    /// handle, never as a durable session key.
    ///
    /// # Example
    ///
    /// ```
    /// use credo_core::StateId;
    ///
    /// let id = StateId::new();
    /// let parsed: StateId = id.to_string().parse().unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    StateId
);

/// Strongly typed identifier for a configured credential source instance.
///
/// Source ids are operator-chosen names (e.g. `"corp-ldap"`), not UUIDs.
/// They key the source registry and prefix the remember-me cookie names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
