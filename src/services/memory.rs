use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::Decision;
use crate::services::store::{DecisionStore, StoreError};

/// In-process decision ledger
///
/// Backs local runs (`storage.backend = "memory"`), tests and benches.
/// The write lock is held across the reciprocity check and the insert,
/// so two racing opposite-direction likes report exactly one match.
pub struct InMemoryStore {
    ledger: RwLock<Ledger>,
    known_users: Option<HashSet<i64>>,
    clock: Clock,
}

/// Source of `created_at` values
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Default)]
struct Ledger {
    decisions: Vec<Decision>,
    by_pair: HashMap<(i64, i64), usize>,
    next_id: i64,
    last_created_at: Option<DateTime<Utc>>,
}

impl Ledger {
    fn liked(&self, actor_id: i64, recipient_id: i64) -> bool {
        self.by_pair
            .get(&(actor_id, recipient_id))
            .map(|&idx| self.decisions[idx].liked)
            .unwrap_or(false)
    }

    /// Store timestamps never run backwards, even if the wall clock does
    fn next_timestamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let ts = match self.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created_at = Some(ts);
        ts
    }

    fn likes_received(&self, recipient_id: i64) -> Vec<&Decision> {
        let mut rows: Vec<&Decision> = self
            .decisions
            .iter()
            .filter(|d| d.recipient_id == recipient_id && d.liked)
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            ledger: RwLock::new(Ledger {
                next_id: 1,
                ..Ledger::default()
            }),
            known_users: None,
            clock: Arc::new(Utc::now),
        }
    }

    /// Stamp decisions with `clock` instead of the wall clock
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            clock: Arc::new(clock),
            ..Self::new()
        }
    }

    /// Only accept decisions between the given users
    pub fn with_known_users<I>(users: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            known_users: Some(users.into_iter().collect()),
            ..Self::new()
        }
    }

    /// Number of decisions recorded so far
    pub async fn len(&self) -> usize {
        self.ledger.read().await.decisions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn is_known(&self, user_id: i64) -> bool {
        self.known_users
            .as_ref()
            .map(|users| users.contains(&user_id))
            .unwrap_or(true)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn page(rows: Vec<&Decision>, offset: usize, limit: usize) -> Vec<Decision> {
    rows.into_iter().skip(offset).take(limit).cloned().collect()
}

#[async_trait]
impl DecisionStore for InMemoryStore {
    async fn record_decision(
        &self,
        actor_id: i64,
        recipient_id: i64,
        liked: bool,
    ) -> Result<bool, StoreError> {
        if !self.is_known(actor_id) || !self.is_known(recipient_id) {
            return Err(StoreError::UnknownUser { actor_id, recipient_id });
        }

        let mut ledger = self.ledger.write().await;

        if ledger.by_pair.contains_key(&(actor_id, recipient_id)) {
            return Err(StoreError::AlreadyDecided { actor_id, recipient_id });
        }

        let mutual = liked && ledger.liked(recipient_id, actor_id);

        let id = ledger.next_id;
        let created_at = ledger.next_timestamp((self.clock)());
        ledger.next_id += 1;
        let idx = ledger.decisions.len();
        ledger.decisions.push(Decision {
            id,
            actor_id,
            recipient_id,
            liked,
            created_at,
        });
        ledger.by_pair.insert((actor_id, recipient_id), idx);

        tracing::debug!(
            "Recorded decision {}: {} -> {} (liked: {}, mutual: {})",
            id,
            actor_id,
            recipient_id,
            liked,
            mutual
        );

        Ok(mutual)
    }

    async fn list_likes_received(
        &self,
        recipient_id: i64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Decision>, StoreError> {
        let ledger = self.ledger.read().await;
        Ok(page(ledger.likes_received(recipient_id), offset, limit))
    }

    async fn list_new_likes_received(
        &self,
        recipient_id: i64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Decision>, StoreError> {
        let ledger = self.ledger.read().await;
        let rows = ledger
            .likes_received(recipient_id)
            .into_iter()
            .filter(|d| !ledger.liked(d.recipient_id, d.actor_id))
            .collect();
        Ok(page(rows, offset, limit))
    }

    async fn count_likes_received(&self, recipient_id: i64) -> Result<u64, StoreError> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .decisions
            .iter()
            .filter(|d| d.recipient_id == recipient_id && d.liked)
            .count() as u64)
    }
}
