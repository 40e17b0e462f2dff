//! Stage-tagged login-attempt state and its stores.

pub mod store;
pub mod types;

pub use store::{InMemoryStateStore, PostgresStateStore, StateStore};
pub use types::{
    AuthStage, AuthnAttempt, FlowError, StateError, StateRecord, DEFAULT_STATE_TTL_SECONDS,
};
