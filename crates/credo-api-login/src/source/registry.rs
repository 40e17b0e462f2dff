//! Credential-source registry
//!
//! Maps configured source instance ids to their backend implementations.
//! The two flow variants are closed: a source is registered either as a
//! plain username/password backend or as an organization backend, and a
//! flow asking for the wrong kind is a configuration error, not something
//! the user can retry past.

use super::{OrganizationCredentialSource, PlainCredentialSource};
use credo_core::SourceId;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered backend, by variant.
#[derive(Clone)]
pub enum CredentialBackend {
    /// Plain username/password source.
    Plain(Arc<dyn PlainCredentialSource>),
    /// Username/password/organization source.
    Organization(Arc<dyn OrganizationCredentialSource>),
}

/// Registry of credential sources keyed by configured instance id.
///
/// Built once at startup from configuration; lookups during a flow that
/// miss indicate the configuration changed mid-attempt.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<SourceId, CredentialBackend>,
}

impl SourceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain username/password source.
    pub fn register_plain(&mut self, source: Arc<dyn PlainCredentialSource>) {
        self.sources
            .insert(source.id().clone(), CredentialBackend::Plain(source));
    }

    /// Register an organization source.
    pub fn register_organization(&mut self, source: Arc<dyn OrganizationCredentialSource>) {
        self.sources
            .insert(source.id().clone(), CredentialBackend::Organization(source));
    }

    /// Look up a backend by instance id.
    #[must_use]
    pub fn get(&self, id: &SourceId) -> Option<&CredentialBackend> {
        self.sources.get(id)
    }

    /// Number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
