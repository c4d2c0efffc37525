//! Error types for counter store operations

/// Errors that can occur while talking to a counter store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with data that does not fit the tally layout
    #[error("malformed store data: {0}")]
    Malformed(String),

    /// The store answered but refused the operation
    #[error("store rejected request with status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the store
        status: u16,
        /// Response body, for diagnostics only
        body: String,
    },

    /// A PostgreSQL driver error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A schema migration failed
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// An HTTP client error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
