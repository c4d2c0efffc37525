//! PostgREST counter store
//!
//! Talks to the same `votes` table and `increment_vote` procedure as
//! [`PgCounterStore`](super::PgCounterStore), but through the REST gateway
//! Supabase puts in front of Postgres. The increment is a single RPC call, so
//! atomicity stays on the database side.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::json;
use tracing::debug;

use super::{CounterStore, INCREMENT_PROCEDURE, StoreError, VOTES_TABLE};
use crate::types::{VoteChoice, VoteTally};

/// Counter store speaking PostgREST over HTTP
#[derive(Clone, Debug)]
pub struct RestCounterStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestCounterStore {
    /// Create a store for the project at `base_url` using `api_key`
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Create a store with a preconfigured HTTP client
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{VOTES_TABLE}?select=choice,count,updated_at&order=choice",
            self.base_url
        )
    }

    fn rpc_url(&self) -> String {
        format!("{}/rest/v1/rpc/{INCREMENT_PROCEDURE}", self.base_url)
    }

    /// Turn a non-2xx answer into [`StoreError::Rejected`]
    async fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CounterStore for RestCounterStore {
    async fn read(&self) -> Result<Vec<VoteTally>, StoreError> {
        let response = self
            .client
            .get(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let body = Self::check_status(response).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Malformed(e.to_string()))
    }

    async fn increment(&self, choice: VoteChoice) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.rpc_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&json!({ "vote_choice": choice.as_str() }))
            .send()
            .await?;

        Self::check_status(response).await?;
        debug!(%choice, "incremented tally over rpc");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "supabase"
    }
}
