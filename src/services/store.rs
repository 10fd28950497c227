use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::models::Decision;

/// Errors that can occur when reading or writing the decision ledger
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Decision already recorded for {actor_id} -> {recipient_id}")]
    AlreadyDecided { actor_id: i64, recipient_id: i64 },

    #[error("Unknown user in decision {actor_id} -> {recipient_id}")]
    UnknownUser { actor_id: i64, recipient_id: i64 },

    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Persistence contract for the decision ledger
///
/// All list queries order rows by `(created_at DESC, id DESC)` so that
/// repeated calls at the same offset see the same rows. Every method may
/// block on external storage; dropping the returned future cancels it.
#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Record a decision and report whether it completes a mutual like
    ///
    /// A pass never matches and skips the reciprocity check. A second
    /// decision for the same ordered pair fails with
    /// [`StoreError::AlreadyDecided`] and leaves the ledger unchanged.
    async fn record_decision(
        &self,
        actor_id: i64,
        recipient_id: i64,
        liked: bool,
    ) -> Result<bool, StoreError>;

    /// Likes received by `recipient_id`, newest first
    async fn list_likes_received(
        &self,
        recipient_id: i64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Decision>, StoreError>;

    /// Likes received by `recipient_id` that the recipient has not liked back
    ///
    /// Only a reciprocal like suppresses a row; a reciprocal pass does not.
    async fn list_new_likes_received(
        &self,
        recipient_id: i64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Decision>, StoreError>;

    async fn count_likes_received(&self, recipient_id: i64) -> Result<u64, StoreError>;

    /// Whether `record_decision` enforces its own deadline
    ///
    /// Backends whose commit can outlive a dropped future (a remote
    /// database) return `true` and bound the write server-side; callers
    /// must then not cancel the write from outside.
    fn bounds_own_writes(&self) -> bool {
        false
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
