//! Wire types shared between the ledger backend and its clients.
//!
//! These are plain serde structs; all timestamps cross the wire as RFC 3339
//! strings and all monetary amounts are integers in the smallest currency
//! unit (cents). Business rules live in the backend, not here.

use serde::{Deserialize, Serialize};

/// Request body for creating an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
}

/// An account as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// Request body for creating a statement (deposit or withdrawal).
///
/// The operation kind is not part of the body; it is taken from the route
/// (`.../statements/deposit` or `.../statements/withdraw`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStatementRequest {
    /// Amount in the smallest currency unit; must be strictly positive.
    pub amount: i64,
    /// Free-text annotation. May be empty.
    pub description: String,
}

/// A single statement as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResponse {
    pub id: String,
    pub account_id: String,
    /// `"deposit"` or `"withdraw"`.
    pub kind: String,
    pub amount: i64,
    pub description: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp; always equal to `created_at` (statements are
    /// never updated).
    pub updated_at: String,
}

/// Response for the balance endpoint: the derived balance plus the full
/// statement log in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: i64,
    pub statements: Vec<StatementResponse>,
}

/// Error body returned for any failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
