//! Domain model for an account.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The identity statements attach to. The ledger core never mutates accounts;
/// it only resolves them by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build a new account with a generated id and creation timestamps.
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }
}
