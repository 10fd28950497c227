// Core explore logic
pub mod explore;
pub mod pagination;

pub use explore::{ExploreService, ExploreError, LikesListing, parse_user_id};
pub use pagination::{decode_token, next_token, effective_page_size};
