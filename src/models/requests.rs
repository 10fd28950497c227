use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to record a like/pass decision
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PutDecisionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "actor_user_id", rename = "actorUserId")]
    pub actor_user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "recipient_user_id", rename = "recipientUserId")]
    pub recipient_user_id: String,
    #[serde(alias = "liked_recipient", rename = "likedRecipient")]
    pub liked_recipient: bool,
}

/// Request to list users who liked the recipient
///
/// Shared by the "liked you" and "new liked you" listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ListLikedYouRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "recipient_user_id", rename = "recipientUserId")]
    pub recipient_user_id: String,
    #[serde(default, alias = "pagination_token", rename = "paginationToken")]
    pub pagination_token: Option<String>,
    #[serde(default, alias = "page_size", rename = "pageSize")]
    pub page_size: Option<usize>,
}

/// Query string accepted by the listing endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, alias = "pagination_token", rename = "paginationToken")]
    pub pagination_token: Option<String>,
    #[serde(default, alias = "page_size", rename = "pageSize")]
    pub page_size: Option<usize>,
}

/// Request to count users who liked the recipient
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CountLikedYouRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "recipient_user_id", rename = "recipientUserId")]
    pub recipient_user_id: String,
}
