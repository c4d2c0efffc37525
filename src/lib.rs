//! Two-option voting service
//!
//! Clients vote for `jjajang` or `jjamppong` and poll the running tallies.
//! Counters live in an external store behind [`store::CounterStore`]; the
//! only abuse control is a per-client cooldown cookie.

pub mod api;
pub mod config;
pub mod cooldown;
pub mod errors;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use errors::{Error, Result};
pub use service::{VoteReceipt, VoteService};
pub use types::{VoteChoice, VoteResult, VoteTally};

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging; `RUST_LOG` overrides the configured level
pub fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "jjvote={level},tower_http={level}",
            level = logging.level
        ))
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| Error::internal(format!("failed to install logger: {e}")))?;

    tracing::info!("🗳️  jjvote v{} initialized", VERSION);
    Ok(())
}
