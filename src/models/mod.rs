// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Decision, Liker};
pub use requests::{PutDecisionRequest, ListLikedYouRequest, CountLikedYouRequest, PageQuery};
pub use responses::{PutDecisionResponse, ListLikedYouResponse, CountLikedYouResponse, HealthResponse, ErrorResponse};
