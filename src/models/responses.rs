use serde::{Deserialize, Serialize};
use crate::models::domain::Liker;

/// Response for the record decision endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutDecisionResponse {
    #[serde(rename = "mutualLikes")]
    pub mutual_likes: bool,
}

/// Response for both liked-you listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLikedYouResponse {
    pub likers: Vec<Liker>,
    #[serde(rename = "nextPaginationToken")]
    pub next_pagination_token: Option<String>,
}

/// Response for the liked-you count endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountLikedYouResponse {
    pub count: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
