//! State storage for login attempts
//!
//! Provides both an in-memory store (for testing) and a PostgreSQL-backed
//! store for production. The store is append-only: saving a mutated attempt
//! always issues a fresh [`StateId`], never updates a row in place. That is
//! what makes concurrent requests referencing the same original id safe —
//! each produces its own successor state instead of racing on a shared write.

use super::types::{AuthStage, AuthnAttempt, StateError, StateRecord};
use async_trait::async_trait;
use chrono::Utc;
use credo_core::StateId;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Store trait for stage-tagged login-attempt state.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Persist an attempt under a new identifier.
    ///
    /// Every call issues a fresh [`StateId`]; the caller's previous id (if
    /// any) becomes semantically stale.
    async fn save(&self, attempt: &AuthnAttempt, stage: AuthStage) -> Result<StateId, StateError>;

    /// Load an attempt, enforcing the expected stage.
    ///
    /// Fails with [`StateError::NotFound`] for unknown ids,
    /// [`StateError::Expired`] past TTL, and [`StateError::StageMismatch`]
    /// when the record was saved by a different flow.
    async fn load(&self, id: StateId, expected: AuthStage) -> Result<AuthnAttempt, StateError>;

    /// Delete expired records.
    ///
    /// Returns the number of records deleted.
    async fn cleanup_expired(&self) -> Result<u64, StateError>;
}

/// In-memory state store for testing
#[derive(Debug)]
pub struct InMemoryStateStore {
    records: Arc<RwLock<HashMap<StateId, StateRecord>>>,
    ttl_seconds: i64,
}

impl InMemoryStateStore {
    #[must_use]
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            ttl_seconds,
        }
    }

    /// Build with the TTL from flow configuration.
    #[must_use]
    pub fn from_config(config: &crate::config::LoginConfig) -> Self {
        Self::new(config.state_ttl_secs)
    }

    /// Number of records currently held. Test helper.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records. Test helper.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn save(&self, attempt: &AuthnAttempt, stage: AuthStage) -> Result<StateId, StateError> {
        let id = StateId::new();
        let record = StateRecord::new(stage, attempt.clone(), self.ttl_seconds);

        let mut records = self.records.write().await;
        records.insert(id, record);

        tracing::debug!(
            state_id = %id,
            stage = %stage,
            source_id = %attempt.source_id,
            "Saved login-attempt state"
        );

        Ok(id)
    }

    async fn load(&self, id: StateId, expected: AuthStage) -> Result<AuthnAttempt, StateError> {
        let records = self.records.read().await;
        let record = records
            .get(&id)
            .ok_or_else(|| StateError::NotFound(id.to_string()))?;

        if record.is_expired() {
            return Err(StateError::Expired {
                state_id: id.to_string(),
                expired_at: record.expires_at,
            });
        }

        if record.stage != expected {
            tracing::warn!(
                state_id = %id,
                expected = %expected,
                actual = %record.stage,
                "Stage mismatch on state load"
            );
            return Err(StateError::StageMismatch {
                expected,
                actual: record.stage,
            });
        }

        Ok(record.attempt.clone())
    }

    async fn cleanup_expired(&self) -> Result<u64, StateError> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|_, record| !record.is_expired());

        let deleted = (before - records.len()) as u64;
        if deleted > 0 {
            tracing::debug!(deleted = deleted, "Cleaned up expired login-attempt state");
        }

        Ok(deleted)
    }
}

/// PostgreSQL-backed state store for production
pub struct PostgresStateStore {
    pool: PgPool,
    ttl_seconds: i64,
}

impl PostgresStateStore {
    #[must_use]
    pub fn new(pool: PgPool, ttl_seconds: i64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Build with the TTL from flow configuration.
    #[must_use]
    pub fn from_config(pool: PgPool, config: &crate::config::LoginConfig) -> Self {
        Self::new(pool, config.state_ttl_secs)
    }
}

#[async_trait]
impl StateStore for PostgresStateStore {
    async fn save(&self, attempt: &AuthnAttempt, stage: AuthStage) -> Result<StateId, StateError> {
        let id = StateId::new();
        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(self.ttl_seconds);
        let payload =
            serde_json::to_value(attempt).map_err(|e| StateError::Storage(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO login_attempt_states (id, stage, payload, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(id.as_uuid())
        .bind(stage.as_str())
        .bind(&payload)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StateError::Storage(e.to_string()))?;

        tracing::debug!(
            state_id = %id,
            stage = %stage,
            source_id = %attempt.source_id,
            expires_at = %expires_at,
            "Saved login-attempt state"
        );

        Ok(id)
    }

    async fn load(&self, id: StateId, expected: AuthStage) -> Result<AuthnAttempt, StateError> {
        let row = sqlx::query(
            r"
            SELECT stage, payload, expires_at
            FROM login_attempt_states
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StateError::Storage(e.to_string()))?;

        let row = row.ok_or_else(|| StateError::NotFound(id.to_string()))?;

        let expires_at: chrono::DateTime<Utc> = row.get("expires_at");
        if Utc::now() > expires_at {
            return Err(StateError::Expired {
                state_id: id.to_string(),
                expired_at: expires_at,
            });
        }

        let stage_str: String = row.get("stage");
        let actual = AuthStage::parse(&stage_str)
            .ok_or_else(|| StateError::Storage(format!("unknown stage tag: {stage_str}")))?;
        if actual != expected {
            tracing::warn!(
                state_id = %id,
                expected = %expected,
                actual = %actual,
                "Stage mismatch on state load"
            );
            return Err(StateError::StageMismatch { expected, actual });
        }

        let payload: serde_json::Value = row.get("payload");
        serde_json::from_value(payload).map_err(|e| StateError::Storage(e.to_string()))
    }

    async fn cleanup_expired(&self) -> Result<u64, StateError> {
        let result = sqlx::query(
            r"
            DELETE FROM login_attempt_states
            WHERE expires_at < NOW()
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StateError::Storage(e.to_string()))?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            tracing::info!(deleted = deleted, "Cleaned up expired login-attempt state");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::DEFAULT_STATE_TTL_SECONDS;
    use credo_core::SourceId;

    fn attempt() -> AuthnAttempt {
        AuthnAttempt::new(SourceId::from("src1"))
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = InMemoryStateStore::new(DEFAULT_STATE_TTL_SECONDS);
        let mut a = attempt();
        a.cached_username = Some("alice".to_string());

        let id = store.save(&a, AuthStage::UserPass).await.unwrap();
        let loaded = store.load(id, AuthStage::UserPass).await.unwrap();
        assert_eq!(loaded.cached_username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_each_save_issues_new_id() {
        let store = InMemoryStateStore::new(DEFAULT_STATE_TTL_SECONDS);
        let a = attempt();

        let id1 = store.save(&a, AuthStage::UserPass).await.unwrap();
        let id2 = store.save(&a, AuthStage::UserPass).await.unwrap();
        assert_ne!(id1, id2);

        // Both remain loadable; the old id is stale only by convention
        assert!(store.load(id1, AuthStage::UserPass).await.is_ok());
        assert!(store.load(id2, AuthStage::UserPass).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_unknown_id() {
        let store = InMemoryStateStore::new(DEFAULT_STATE_TTL_SECONDS);
        let result = store.load(StateId::new(), AuthStage::UserPass).await;
        assert!(matches!(result, Err(StateError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stage_mismatch_is_an_error() {
        let store = InMemoryStateStore::new(DEFAULT_STATE_TTL_SECONDS);
        let id = store.save(&attempt(), AuthStage::UserPass).await.unwrap();

        let result = store.load(id, AuthStage::UserPassOrg).await;
        assert!(matches!(
            result,
            Err(StateError::StageMismatch {
                expected: AuthStage::UserPassOrg,
                actual: AuthStage::UserPass,
            })
        ));
    }

    #[tokio::test]
    async fn test_from_config_applies_configured_ttl() {
        let config = crate::config::LoginConfig {
            state_ttl_secs: -60,
            ..crate::config::LoginConfig::default()
        };
        let store = InMemoryStateStore::from_config(&config);
        let id = store.save(&attempt(), AuthStage::UserPass).await.unwrap();

        let result = store.load(id, AuthStage::UserPass).await;
        assert!(matches!(result, Err(StateError::Expired { .. })));
    }

    #[tokio::test]
    async fn test_expired_state_rejected() {
        let store = InMemoryStateStore::new(-60);
        let id = store.save(&attempt(), AuthStage::UserPass).await.unwrap();

        let result = store.load(id, AuthStage::UserPass).await;
        assert!(matches!(result, Err(StateError::Expired { .. })));
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let expired = InMemoryStateStore::new(-60);
        let _ = expired.save(&attempt(), AuthStage::UserPass).await.unwrap();
        assert_eq!(expired.cleanup_expired().await.unwrap(), 1);
        assert!(expired.is_empty().await);

        let fresh = InMemoryStateStore::new(DEFAULT_STATE_TTL_SECONDS);
        let _ = fresh.save(&attempt(), AuthStage::UserPass).await.unwrap();
        assert_eq!(fresh.cleanup_expired().await.unwrap(), 0);
        assert_eq!(fresh.len().await, 1);
    }
}
