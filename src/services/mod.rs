// Service exports
pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::{Clock, InMemoryStore};
pub use postgres::{PostgresClient, pair_lock_key};
pub use store::{DecisionStore, StoreError};
