//! Error types for the ledger and account services.
//!
//! Each variant carries its message via `Display` and an HTTP status hint as
//! data, so the REST layer can dispatch on the tag without knowing about
//! individual error conditions.

use thiserror::Error;

/// Errors surfaced by the ledger write path and the query side.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Account id does not resolve to an existing account.
    #[error("User not found")]
    UserNotFound,

    /// Amount was zero or negative.
    #[error("Invalid amount")]
    InvalidAmount,

    /// Operation kind was not `deposit` or `withdraw`.
    #[error("Invalid operation type")]
    InvalidOperationType,

    /// Withdrawal amount exceeds the current balance.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Statement id does not resolve, or the statement belongs to a
    /// different account.
    #[error("Statement not found")]
    StatementNotFound,

    /// Underlying persistence failure. Transient; callers may retry.
    #[error("Storage failure: {0}")]
    Storage(anyhow::Error),
}

impl LedgerError {
    /// HTTP status hint for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            LedgerError::UserNotFound | LedgerError::StatementNotFound => 404,
            LedgerError::InvalidAmount
            | LedgerError::InvalidOperationType
            | LedgerError::InsufficientFunds => 400,
            LedgerError::Storage(_) => 500,
        }
    }
}

impl From<anyhow::Error> for LedgerError {
    fn from(err: anyhow::Error) -> Self {
        LedgerError::Storage(err)
    }
}

/// Errors surfaced by account creation and lookup.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("User already exists")]
    EmailTaken,

    #[error("User not found")]
    NotFound,

    #[error("Storage failure: {0}")]
    Storage(anyhow::Error),
}

impl AccountError {
    /// HTTP status hint for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            AccountError::NotFound => 404,
            AccountError::MissingFields | AccountError::InvalidEmail | AccountError::EmailTaken => {
                400
            }
            AccountError::Storage(_) => 500,
        }
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Storage(err)
    }
}
