//! Counter store abstraction and backends
//!
//! The service never holds counters itself. Every mutation goes through
//! [`CounterStore::increment`], which each backend implements as a single
//! store-side atomic operation:
//!
//! - [`MemoryCounterStore`]: in-process map guarded by one lock
//! - [`PgCounterStore`]: PostgreSQL via sqlx, calling `increment_vote`
//! - [`RestCounterStore`]: PostgREST (as exposed by Supabase) over HTTP

pub mod error;
pub mod memory;
pub mod postgres;
pub mod rest;

pub use error::StoreError;
pub use memory::MemoryCounterStore;
pub use postgres::PgCounterStore;
pub use rest::RestCounterStore;

use crate::types::{VoteChoice, VoteTally};

/// Name of the table holding one row per choice
pub const VOTES_TABLE: &str = "votes";

/// Name of the store-side atomic increment procedure
pub const INCREMENT_PROCEDURE: &str = "increment_vote";

/// Durable per-choice counters
///
/// Implementations must be `Send + Sync` so one instance can serve every
/// request task.
#[async_trait::async_trait]
pub trait CounterStore: Send + Sync {
    /// Read every tally row, ordered by choice
    async fn read(&self) -> Result<Vec<VoteTally>, StoreError>;

    /// Atomically add one to `choice` and stamp its modification time
    async fn increment(&self, choice: VoteChoice) -> Result<(), StoreError>;

    /// Short backend name used in logs
    fn backend(&self) -> &'static str;
}
