//! Unified error types and result handling.
//!
//! Every failure that can reach a request handler is represented here so the
//! boundary can tell "not an ordering day" and "bad API key" apart from a
//! genuine persistence failure. Malformed submitted quantities are
//! deliberately *not* an error: the ingestion policy is to drop them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Weekday {weekday} is not an ordering day")]
    NotOrderingDay { weekday: u32 },

    #[error("Product not found: {name}")]
    ProductNotFound { name: String },

    #[error("Product already exists: {name}")]
    DuplicateProduct { name: String },

    #[error("Unknown store: {name}")]
    UnknownStore { name: String },

    #[error("Missing or invalid API key")]
    Unauthorized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
