//! Vote recording and result aggregation
//!
//! [`VoteService`] is the transport-independent core behind `POST /vote` and
//! `GET /result`. Request-scoped inputs (the raw cooldown cookie, the clock)
//! are explicit parameters, and the fresh cooldown marker comes back in the
//! [`VoteReceipt`] for the caller to attach.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::cooldown::{CooldownCheck, CooldownMarker, CooldownPolicy};
use crate::store::CounterStore;
use crate::types::{VoteChoice, VoteResult};
use crate::validation::parse_choice;
use crate::{Error, Result, config_error};

/// Outcome of an accepted vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteReceipt {
    pub choice: VoteChoice,
    /// Marker to hand back to the client
    pub marker: CooldownMarker,
}

/// Vote and result operations over a [`CounterStore`]
#[derive(Clone)]
pub struct VoteService {
    store: Arc<dyn CounterStore>,
    cooldown: CooldownPolicy,
}

impl VoteService {
    /// Create a service over `store` with the given cooldown policy
    pub fn new(store: Arc<dyn CounterStore>, cooldown: CooldownPolicy) -> Self {
        Self { store, cooldown }
    }

    /// Cooldown policy in effect
    pub fn cooldown(&self) -> &CooldownPolicy {
        &self.cooldown
    }

    /// Record one vote
    ///
    /// Flow:
    /// 1. Reject with [`Error::RateLimited`] while the marker is fresh; the
    ///    store is not touched on this path
    /// 2. Parse and validate the body's `choice`
    /// 3. Increment the tally through the store's atomic operation
    /// 4. Issue a new marker stamped `now`
    pub async fn cast_vote(
        &self,
        body: &[u8],
        marker: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<VoteReceipt> {
        let now_ms = now.timestamp_millis();
        let marker = marker.and_then(CooldownMarker::parse);

        if let CooldownCheck::Active { remaining_seconds } = self.cooldown.check(marker, now_ms) {
            debug!(remaining_seconds, "vote rejected during cooldown");
            return Err(Error::rate_limited(
                remaining_seconds,
                self.cooldown.window_ms(),
            ));
        }

        let choice = parse_choice(body)?;

        self.store.increment(choice).await.map_err(|e| {
            error!(%choice, backend = self.store.backend(), error = %e, "failed to increment vote");
            Error::persistence_write("failed to increment vote")
        })?;

        info!(%choice, "vote recorded");
        Ok(VoteReceipt {
            choice,
            marker: CooldownMarker(now_ms),
        })
    }

    /// Current aggregate snapshot
    ///
    /// `now` is only used as `updatedAt` when the store holds no rows.
    pub async fn results(&self, now: DateTime<Utc>) -> Result<VoteResult> {
        let tallies = self.store.read().await.map_err(|e| {
            error!(backend = self.store.backend(), error = %e, "failed to read votes");
            Error::persistence_read("failed to read votes")
        })?;

        Ok(VoteResult::from_tallies(&tallies, now))
    }

    /// Check that the store holds a tally row for every choice
    ///
    /// Rows are seeded out of band; a missing row is a deployment error.
    pub async fn verify_seeded(&self) -> Result<()> {
        let tallies = self
            .store
            .read()
            .await
            .map_err(|e| Error::persistence_read(e.to_string()))?;

        let missing: Vec<&str> = VoteChoice::ALL
            .iter()
            .filter(|choice| !tallies.iter().any(|tally| tally.choice == **choice))
            .map(VoteChoice::as_str)
            .collect();

        if !missing.is_empty() {
            return Err(config_error!(
                "votes table is missing seed rows for: {}",
                missing.join(", ")
            ));
        }

        if tallies.len() != VoteChoice::ALL.len() {
            return Err(config_error!(
                "votes table holds {} rows, expected one per choice",
                tallies.len()
            ));
        }

        Ok(())
    }
}
