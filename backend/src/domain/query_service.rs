//! Read side: balance and statement views.
//!
//! Queries bypass the ledger engine entirely and never mutate. A balance
//! returned here is a stale-but-consistent snapshot; the no-overdraw
//! guarantee lives in the write path, not in these reads.

use std::sync::Arc;

use tracing::info;

use crate::domain::balance::balance;
use crate::domain::errors::LedgerError;
use crate::domain::models::Statement;
use crate::storage::traits::{AccountStore, StatementStore};

/// A derived balance together with the statement log it was folded from.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSummary {
    pub balance: i64,
    pub statements: Vec<Statement>,
}

pub struct QueryService {
    accounts: Arc<dyn AccountStore>,
    statements: Arc<dyn StatementStore>,
}

impl QueryService {
    pub fn new(accounts: Arc<dyn AccountStore>, statements: Arc<dyn StatementStore>) -> Self {
        Self {
            accounts,
            statements,
        }
    }

    /// Current balance plus the full statement log, in creation order.
    pub async fn get_balance(&self, account_id: &str) -> Result<BalanceSummary, LedgerError> {
        if self.accounts.get(account_id).await?.is_none() {
            return Err(LedgerError::UserNotFound);
        }

        let statements = self.statements.list_by_account(account_id).await?;
        let balance = balance(&statements);
        info!(
            "Balance for account {}: {} over {} statements",
            account_id,
            balance,
            statements.len()
        );

        Ok(BalanceSummary {
            balance,
            statements,
        })
    }

    /// Fetch one statement, checking ownership explicitly: a statement that
    /// exists but belongs to a different account is reported as not found,
    /// never leaked across accounts.
    pub async fn get_statement(
        &self,
        account_id: &str,
        statement_id: &str,
    ) -> Result<Statement, LedgerError> {
        if self.accounts.get(account_id).await?.is_none() {
            return Err(LedgerError::UserNotFound);
        }

        match self.statements.get(statement_id).await? {
            Some(statement) if statement.account_id == account_id => Ok(statement),
            _ => Err(LedgerError::StatementNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Account, OperationType};
    use crate::storage::MemoryStore;

    async fn setup() -> (Arc<MemoryStore>, QueryService, Account) {
        let store = Arc::new(MemoryStore::new());
        let service = QueryService::new(store.clone(), store.clone());
        let account = Account::new("John".to_string(), "john@mail.com".to_string());
        store.create(&account).await.unwrap();
        (store, service, account)
    }

    async fn append(store: &MemoryStore, account_id: &str, kind: OperationType, amount: i64) -> Statement {
        let s = Statement::new(account_id, kind, amount, String::new());
        store.append(&s).await.unwrap();
        s
    }

    #[tokio::test]
    async fn balance_folds_the_full_log() {
        let (store, service, account) = setup().await;
        append(&store, &account.id, OperationType::Deposit, 1000).await;
        append(&store, &account.id, OperationType::Withdraw, 300).await;

        let summary = service.get_balance(&account.id).await.unwrap();
        assert_eq!(summary.balance, 700);
        assert_eq!(summary.statements.len(), 2);
        assert_eq!(summary.statements[0].amount, 1000);
    }

    #[tokio::test]
    async fn balance_is_zero_without_statements() {
        let (_, service, account) = setup().await;
        let summary = service.get_balance(&account.id).await.unwrap();
        assert_eq!(summary.balance, 0);
        assert!(summary.statements.is_empty());
    }

    #[tokio::test]
    async fn balance_for_unknown_account_fails() {
        let (_, service, _) = setup().await;
        let err = service.get_balance("not_found").await.unwrap_err();
        assert!(matches!(err, LedgerError::UserNotFound));
    }

    #[tokio::test]
    async fn get_statement_returns_own_statement() {
        let (store, service, account) = setup().await;
        let s = append(&store, &account.id, OperationType::Deposit, 100).await;

        let fetched = service.get_statement(&account.id, &s.id).await.unwrap();
        assert_eq!(fetched, s);
    }

    #[tokio::test]
    async fn get_statement_owned_by_another_account_is_not_found() {
        let (store, service, account) = setup().await;
        let other = Account::new("Jane".to_string(), "jane@mail.com".to_string());
        store.create(&other).await.unwrap();
        let foreign = append(&store, &other.id, OperationType::Deposit, 100).await;

        let err = service.get_statement(&account.id, &foreign.id).await.unwrap_err();
        assert!(matches!(err, LedgerError::StatementNotFound));
    }

    #[tokio::test]
    async fn get_statement_checks_account_before_statement() {
        let (store, service, account) = setup().await;
        let s = append(&store, &account.id, OperationType::Deposit, 100).await;

        let err = service.get_statement("not_found", &s.id).await.unwrap_err();
        assert!(matches!(err, LedgerError::UserNotFound));

        let err = service.get_statement(&account.id, "missing").await.unwrap_err();
        assert!(matches!(err, LedgerError::StatementNotFound));
    }
}
