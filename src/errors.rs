//! Error handling for the voting service

/// Result type alias for the voting service
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the voting service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A vote arrived while the caller's cooldown marker is still fresh
    #[error("Too many votes: retry in {remaining_seconds}s")]
    RateLimited {
        remaining_seconds: u64,
        cooldown_ms: u64,
    },

    /// Missing or unknown choice in a vote submission
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The counter store could not be read
    #[error("Persistence read error: {message}")]
    PersistenceRead { message: String },

    /// The counter store rejected or failed an increment
    #[error("Persistence write error: {message}")]
    PersistenceWrite { message: String },

    /// Environment or deployment misconfiguration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new rate limit error
    pub fn rate_limited(remaining_seconds: u64, cooldown_ms: u64) -> Self {
        Self::RateLimited {
            remaining_seconds,
            cooldown_ms,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new persistence read error
    pub fn persistence_read(message: impl Into<String>) -> Self {
        Self::PersistenceRead {
            message: message.into(),
        }
    }

    /// Create a new persistence write error
    pub fn persistence_write(message: impl Into<String>) -> Self {
        Self::PersistenceWrite {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convenience macros for creating specific error types
#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::Error::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::validation(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::Error::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::config(format!($fmt, $($arg)*))
    };
}
