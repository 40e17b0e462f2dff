//! credo Core Library
//!
//! Shared types for credo.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`StateId`, `SourceId`)
//!
//! # Example
//!
//! ```
//! use credo_core::{SourceId, StateId};
//!
//! let state_id = StateId::new();
//! let source_id = SourceId::from("example-userpass");
//! ```

pub mod ids;

// Re-export main types for convenient access
pub use ids::{ParseIdError, SourceId, StateId};
