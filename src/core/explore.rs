use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::pagination::{decode_token, effective_page_size, next_token};
use crate::models::{
    CountLikedYouRequest, CountLikedYouResponse, ListLikedYouRequest, ListLikedYouResponse,
    PutDecisionRequest, PutDecisionResponse,
};
use crate::services::{DecisionStore, StoreError};

/// Errors surfaced to callers of the explore operations
#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("Invalid pagination token '{0}': must be a non-negative integer")]
    InvalidPaginationToken(String),

    #[error("Invalid user id '{0}': must be a numeric identifier")]
    InvalidUserId(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Which liked-you listing to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikesListing {
    /// Every like the recipient has received
    All,
    /// Likes the recipient has not liked back yet
    New,
}

/// Request-level façade over a [`DecisionStore`]
///
/// Translates wire identifiers and pagination tokens into store calls,
/// applies the page-size ceiling and bounds every store call with a
/// deadline. Holds no mutable state; clones share the same store.
#[derive(Clone)]
pub struct ExploreService {
    store: Arc<dyn DecisionStore>,
    max_page_size: usize,
    request_timeout: Duration,
}

impl ExploreService {
    pub fn new(store: Arc<dyn DecisionStore>, max_page_size: usize) -> Self {
        Self {
            store,
            max_page_size: max_page_size.max(1),
            request_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    /// Record a like or pass and report whether it completed a mutual like
    pub async fn put_decision(
        &self,
        req: &PutDecisionRequest,
    ) -> Result<PutDecisionResponse, ExploreError> {
        let actor_id = parse_user_id(&req.actor_user_id)?;
        let recipient_id = parse_user_id(&req.recipient_user_id)?;

        let write = self
            .store
            .record_decision(actor_id, recipient_id, req.liked_recipient);
        let mutual_likes = if self.store.bounds_own_writes() {
            write.await?
        } else {
            self.with_deadline(write).await?
        };

        if mutual_likes {
            tracing::info!("Mutual like between {} and {}", actor_id, recipient_id);
        }

        Ok(PutDecisionResponse { mutual_likes })
    }

    pub async fn list_liked_you(
        &self,
        req: &ListLikedYouRequest,
    ) -> Result<ListLikedYouResponse, ExploreError> {
        self.list_likes(req, LikesListing::All).await
    }

    pub async fn list_new_liked_you(
        &self,
        req: &ListLikedYouRequest,
    ) -> Result<ListLikedYouResponse, ExploreError> {
        self.list_likes(req, LikesListing::New).await
    }

    pub async fn count_liked_you(
        &self,
        req: &CountLikedYouRequest,
    ) -> Result<CountLikedYouResponse, ExploreError> {
        let recipient_id = parse_user_id(&req.recipient_user_id)?;
        let count = self
            .with_deadline(self.store.count_likes_received(recipient_id))
            .await?;

        Ok(CountLikedYouResponse { count })
    }

    pub async fn health_check(&self) -> bool {
        match self.with_deadline(self.store.health_check()).await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("Store health check failed: {}", e);
                false
            }
        }
    }

    /// Shared body of both listings: decode, query one page, re-encode
    pub async fn list_likes(
        &self,
        req: &ListLikedYouRequest,
        listing: LikesListing,
    ) -> Result<ListLikedYouResponse, ExploreError> {
        let recipient_id = parse_user_id(&req.recipient_user_id)?;
        let offset = decode_token(req.pagination_token.as_deref())?;
        let page_size = effective_page_size(req.page_size, self.max_page_size);

        let decisions = match listing {
            LikesListing::All => {
                self.with_deadline(
                    self.store
                        .list_likes_received(recipient_id, offset, page_size),
                )
                .await?
            }
            LikesListing::New => {
                self.with_deadline(
                    self.store
                        .list_new_likes_received(recipient_id, offset, page_size),
                )
                .await?
            }
        };

        tracing::debug!(
            "Listed {} {:?} likes for user {} (offset: {}, page size: {})",
            decisions.len(),
            listing,
            recipient_id,
            offset,
            page_size
        );

        Ok(ListLikedYouResponse {
            next_pagination_token: next_token(decisions.len(), offset, page_size),
            likers: decisions.iter().map(|d| d.to_liker()).collect(),
        })
    }

    /// Run a store call under the request deadline
    ///
    /// On expiry the store future is dropped, which cancels the call.
    /// Writes only go through here when the store cannot bound them
    /// itself; the in-memory ledger commits within a single poll, so a
    /// dropped write never leaves a row behind.
    async fn with_deadline<T, F>(&self, call: F) -> Result<T, ExploreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                tracing::warn!("Store call exceeded {:?}", self.request_timeout);
                Err(StoreError::Timeout(self.request_timeout).into())
            }
        }
    }
}

/// Map a wire identifier onto the integer storage key
pub fn parse_user_id(raw: &str) -> Result<i64, ExploreError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExploreError::InvalidUserId(raw.to_string()));
    }
    raw.parse::<i64>()
        .map_err(|_| ExploreError::InvalidUserId(raw.to_string()))
}
