//! Unified error types for `PriceBuddy`.
//!
//! Validation failures are recovered locally and shown to the user; database
//! failures are surfaced once and the operation is abandoned. Nothing here is
//! fatal to the process.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid user input (required fields, non-positive quantities).
    #[error("{message}")]
    Validation {
        /// User-facing explanation
        message: String,
    },

    /// A record that still has no computable unit price after normalization.
    #[error("Product '{name}' has no unit price")]
    IncompleteRecord {
        /// Name of the incomplete product
        name: String,
    },

    /// The requested product id is not in the user's set.
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Save, update, delete or load against the database failed.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A legacy JSON payload could not be decoded.
    #[error("Legacy data error: {0}")]
    LegacyData(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Discord error: {0}")]
    Discord(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Shorthand for a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
