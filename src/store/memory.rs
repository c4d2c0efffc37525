//! In-memory counter store

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{CounterStore, StoreError};
use crate::types::{VoteChoice, VoteTally};

/// Counter store backed by a `RwLock<BTreeMap>`
///
/// Seeded with a zero row for every choice at construction, so the table is
/// never empty. Useful for tests and for single-process deployments where
/// losing the counts on restart is acceptable.
pub struct MemoryCounterStore {
    tallies: RwLock<BTreeMap<VoteChoice, (i64, DateTime<Utc>)>>,
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCounterStore {
    /// Create a store with every choice at zero
    pub fn new() -> Self {
        Self::with_counts(0, 0)
    }

    /// Create a store with the given starting counts
    pub fn with_counts(jjajang: i64, jjamppong: i64) -> Self {
        let now = Utc::now();
        let tallies = BTreeMap::from([
            (VoteChoice::Jjajang, (jjajang, now)),
            (VoteChoice::Jjamppong, (jjamppong, now)),
        ]);

        Self {
            tallies: RwLock::new(tallies),
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn read(&self) -> Result<Vec<VoteTally>, StoreError> {
        let tallies = self
            .tallies
            .read()
            .map_err(|_| StoreError::Unavailable("tally lock poisoned".to_string()))?;

        Ok(tallies
            .iter()
            .map(|(choice, (count, last_modified))| VoteTally {
                choice: *choice,
                count: *count,
                last_modified: *last_modified,
            })
            .collect())
    }

    async fn increment(&self, choice: VoteChoice) -> Result<(), StoreError> {
        let mut tallies = self
            .tallies
            .write()
            .map_err(|_| StoreError::Unavailable("tally lock poisoned".to_string()))?;

        let (count, last_modified) = tallies
            .get_mut(&choice)
            .ok_or_else(|| StoreError::Malformed(format!("no tally row for {choice}")))?;
        *count += 1;
        *last_modified = Utc::now();

        debug!(%choice, count = *count, "incremented in-memory tally");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
