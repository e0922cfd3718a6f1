use sensemaker_protocol::EntryId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Ledger state lock poisoned")]
    Poisoned,

    #[error("{0}")]
    Other(String),
}
