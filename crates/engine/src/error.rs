//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Client`] thrown when a fetch against the directory API fails. This
//!   includes uniqueness violations of singular lookups.
//! - [`UnsupportedCurrency`] thrown when a salary uses an unknown currency.
//!
//!  [`Client`]: EngineError::Client
//!  [`UnsupportedCurrency`]: EngineError::UnsupportedCurrency
use client::ClientError;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Client(a), Self::Client(b)) => a.to_string() == b.to_string(),
            (Self::UnsupportedCurrency(a), Self::UnsupportedCurrency(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidRecord(a), Self::InvalidRecord(b)) => a == b,
            _ => false,
        }
    }
}
