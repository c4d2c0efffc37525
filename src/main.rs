use std::sync::Arc;

use jjvote::api::{self, AppState};
use jjvote::config::{Config, StoreConfig};
use jjvote::cooldown::CooldownPolicy;
use jjvote::store::{CounterStore, MemoryCounterStore, PgCounterStore, RestCounterStore};
use jjvote::{Error, Result, VoteService};
use tracing::{error, info};

/// Construct the configured counter store
async fn build_store(config: &StoreConfig) -> Result<Arc<dyn CounterStore>> {
    let store: Arc<dyn CounterStore> = match config {
        StoreConfig::Memory => Arc::new(MemoryCounterStore::new()),
        StoreConfig::Postgres {
            database_url,
            max_connections,
            run_migrations,
        } => {
            let store = PgCounterStore::connect(database_url, *max_connections)
                .await
                .map_err(|e| Error::persistence_read(e.to_string()))?;
            if *run_migrations {
                store
                    .migrate()
                    .await
                    .map_err(|e| Error::persistence_write(e.to_string()))?;
            }
            Arc::new(store)
        }
        StoreConfig::Supabase { url, anon_key } => {
            Arc::new(RestCounterStore::new(url.as_str(), anon_key.as_str()))
        }
    };

    info!(backend = store.backend(), "counter store ready");
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    jjvote::init_logging(&config.logging)?;

    let store = build_store(&config.store).await?;
    let service = VoteService::new(store, CooldownPolicy::new(config.voting.cooldown_ms));
    service.verify_seeded().await?;

    let state = AppState::new(service, config.server.secure_cookies);
    let app = api::router(state, &config.server)?;

    let listener = tokio::net::TcpListener::bind(config.server.addr)
        .await
        .map_err(|e| Error::internal(format!("failed to bind {}: {e}", config.server.addr)))?;
    info!(addr = %config.server.addr, "vote server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::internal(format!("server error: {e}")))
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The logger may not be installed yet.
        eprintln!("jjvote: {e}");
        error!(error = %e, "jjvote exited with error");
        std::process::exit(1);
    }
}
