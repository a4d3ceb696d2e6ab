//! Error handling for the daily-thoughts client

use std::fmt;
use thiserror::Error;

use daily_thoughts_firestore::FirestoreError;

/// Unified error type for the viewer, the admin console and the stores
#[derive(Error, Debug)]
pub enum Error {
    /// Remote document store failures
    #[error("{0}")]
    Store(#[from] FirestoreError),

    /// Network or HTTP related errors outside the store (downloads)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file errors (flag storage, saved downloads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A form failed its checks before any remote call
    #[error("{0}")]
    Validation(String),

    /// Store errors raised by non-remote backends
    #[error("Database error: {0}")]
    Database(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    pub fn database<T: fmt::Display>(msg: T) -> Self {
        Error::Database(msg.to_string())
    }

    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
