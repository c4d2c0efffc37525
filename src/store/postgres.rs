//! PostgreSQL counter store
//!
//! Expects the layout created by `migrations/0001_votes.sql`: a `votes` table
//! keyed by `choice` with pre-seeded rows, and an `increment_vote(text)`
//! procedure that bumps `count` and `updated_at` in one statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use super::{CounterStore, INCREMENT_PROCEDURE, StoreError, VOTES_TABLE};
use crate::types::{VoteChoice, VoteTally};

/// Raw row as stored in the `votes` table
#[derive(Debug, sqlx::FromRow)]
struct TallyRow {
    choice: String,
    count: i64,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TallyRow> for VoteTally {
    type Error = StoreError;

    fn try_from(row: TallyRow) -> Result<Self, Self::Error> {
        let choice = row
            .choice
            .parse::<VoteChoice>()
            .map_err(|_| StoreError::Malformed(format!("unknown choice row '{}'", row.choice)))?;

        Ok(VoteTally {
            choice,
            count: row.count,
            last_modified: row.updated_at,
        })
    }
}

/// Counter store backed by a sqlx PostgreSQL pool
#[derive(Clone, Debug)]
pub struct PgCounterStore {
    pool: PgPool,
}

impl PgCounterStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the connection pool and wrap it
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!(max_connections, "connected to postgres counter store");
        Ok(Self::new(pool))
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("applied counter store migrations");
        Ok(())
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    async fn read(&self) -> Result<Vec<VoteTally>, StoreError> {
        let query = format!("SELECT choice, count, updated_at FROM {VOTES_TABLE} ORDER BY choice");
        let rows = sqlx::query_as::<_, TallyRow>(&query)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(VoteTally::try_from).collect()
    }

    async fn increment(&self, choice: VoteChoice) -> Result<(), StoreError> {
        let query = format!("SELECT {INCREMENT_PROCEDURE}($1)");
        sqlx::query(&query)
            .bind(choice.as_str())
            .execute(&self.pool)
            .await?;

        debug!(%choice, "incremented postgres tally");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
