//! Lume Explore - like/pass decision ledger for Lume dating app
//!
//! Records one-directional like/pass decisions and answers "who liked
//! me", "who liked me that I haven't liked back" and "how many liked
//! me". Mutual likes are detected when the second like is written.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ExploreService, ExploreError, LikesListing};
pub use models::{Decision, Liker, PutDecisionRequest, PutDecisionResponse, ListLikedYouRequest, ListLikedYouResponse, CountLikedYouRequest, CountLikedYouResponse};
pub use services::{DecisionStore, StoreError, InMemoryStore, PostgresClient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let token = crate::core::next_token(10, 0, 10);
        assert_eq!(token.as_deref(), Some("10"));
    }
}
