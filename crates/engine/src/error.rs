//! The module contains the errors the engine can return.

use thiserror::Error;

use crate::store::StoreError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidRecord(a), Self::InvalidRecord(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
