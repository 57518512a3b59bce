//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Cart engine errors
///
/// Every variant maps to a friendly user message at the dispatch boundary;
/// none of them terminate the session.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown product: {0}")]
    ProductNotFound(i64),

    #[error("Unknown category: {0}")]
    CategoryNotFound(String),

    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid catalog row: {0}")]
    InvalidRow(String),
}

/// Inbound event parsing errors
///
/// Raised at the boundary for malformed commands and callback payloads;
/// nothing downstream sees the bad input.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
