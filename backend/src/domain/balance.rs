//! Balance derivation.
//!
//! A balance is never stored; it is always recomputed by folding an account's
//! statement log. Keeping this a pure function eliminates staleness bugs
//! outright.

use crate::domain::models::{OperationType, Statement};

/// Fold a statement sequence into a signed balance:
/// deposits add, withdrawals subtract. Empty input yields 0.
pub fn balance(statements: &[Statement]) -> i64 {
    statements.iter().fold(0, |acc, s| match s.kind {
        OperationType::Deposit => acc + s.amount,
        OperationType::Withdraw => acc - s.amount,
    })
}
