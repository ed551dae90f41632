//! Domain model for a statement (one deposit or withdrawal).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of monetary movement a statement records.
///
/// Wire representation is lowercase (`"deposit"` / `"withdraw"`); anything
/// else is rejected at parse time rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Deposit,
    Withdraw,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Deposit => "deposit",
            OperationType::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(OperationType::Deposit),
            "withdraw" => Ok(OperationType::Withdraw),
            other => Err(format!("Unrecognized operation type: {}", other)),
        }
    }
}

/// An immutable record of a single deposit or withdrawal.
///
/// Statements are only ever appended; there is no update or delete path, and
/// `updated_at` stays equal to `created_at` (the field exists for symmetry
/// with the storage schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: String,
    pub account_id: String,
    pub kind: OperationType,
    /// Amount in the smallest currency unit; always strictly positive.
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Statement {
    /// Build a new statement with a generated id and creation timestamps.
    pub fn new(account_id: &str, kind: OperationType, amount: i64, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            kind,
            amount,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_type_parses_known_values() {
        assert_eq!("deposit".parse::<OperationType>().unwrap(), OperationType::Deposit);
        assert_eq!("withdraw".parse::<OperationType>().unwrap(), OperationType::Withdraw);
    }

    #[test]
    fn operation_type_rejects_unknown_values() {
        assert!("transfer".parse::<OperationType>().is_err());
        assert!("DEPOSIT".parse::<OperationType>().is_err());
        assert!("".parse::<OperationType>().is_err());
    }

    #[test]
    fn new_statement_has_equal_timestamps() {
        let statement = Statement::new("acct-1", OperationType::Deposit, 100, "deposit".to_string());
        assert_eq!(statement.created_at, statement.updated_at);
        assert!(!statement.id.is_empty());
    }

    #[test]
    fn operation_type_serializes_lowercase() {
        let json = serde_json::to_string(&OperationType::Withdraw).unwrap();
        assert_eq!(json, "\"withdraw\"");
    }
}
