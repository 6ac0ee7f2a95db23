use thiserror::Error;

/// Error type that captures common ledger failures.
///
/// Domain mutations never produce these; malformed input is ignored instead.
/// Only persistence and configuration I/O surface errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid month index: {0}")]
    InvalidMonth(usize),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
