use serde::{Deserialize, Serialize};

/// A single like/pass decision as stored in the ledger
///
/// Decisions are immutable once recorded. `id` and `created_at` are
/// assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Decision {
    pub id: i64,
    pub actor_id: i64,
    pub recipient_id: i64,
    pub liked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Decision {
    /// Seconds since the Unix epoch, clamped at zero
    pub fn unix_timestamp(&self) -> u64 {
        u64::try_from(self.created_at.timestamp()).unwrap_or(0)
    }

    /// Wire representation used by the liked-you listings
    pub fn to_liker(&self) -> Liker {
        Liker {
            actor_id: self.actor_id.to_string(),
            unix_timestamp: self.unix_timestamp(),
        }
    }
}

/// A user who liked the recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liker {
    #[serde(rename = "actorId", alias = "actor_id")]
    pub actor_id: String,
    #[serde(rename = "unixTimestamp", alias = "unix_timestamp")]
    pub unix_timestamp: u64,
}
