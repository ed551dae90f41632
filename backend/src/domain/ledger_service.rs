//! The ledger engine: the single write path for balance changes.
//!
//! Every deposit or withdrawal goes through [`LedgerService::create_statement`],
//! which validates the request, re-checks sufficiency of funds against a
//! freshly folded balance, and appends the statement while holding a
//! per-account lock so concurrent withdrawals cannot both pass the check
//! against a stale balance.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::info;

use crate::domain::balance::balance;
use crate::domain::errors::LedgerError;
use crate::domain::models::{OperationType, Statement};
use crate::storage::traits::{AccountStore, StatementStore};

/// Input for the ledger write path. `kind` arrives as the raw wire string and
/// is validated here, not at the boundary, so error precedence stays
/// deterministic: type, then amount, then account, then funds.
#[derive(Debug, Clone)]
pub struct CreateStatementCommand {
    pub account_id: String,
    pub kind: String,
    pub amount: i64,
    pub description: String,
}

/// One async mutex per account id. Locks are created lazily and never
/// removed; cross-account operations never contend.
#[derive(Default)]
struct AccountLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl AccountLocks {
    fn for_account(&self, account_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(account_id.to_string()).or_default().clone()
    }
}

pub struct LedgerService {
    accounts: Arc<dyn AccountStore>,
    statements: Arc<dyn StatementStore>,
    locks: AccountLocks,
}

impl LedgerService {
    pub fn new(accounts: Arc<dyn AccountStore>, statements: Arc<dyn StatementStore>) -> Self {
        Self {
            accounts,
            statements,
            locks: AccountLocks::default(),
        }
    }

    /// Validate and append one statement.
    ///
    /// The account lock is held from account resolution through the append,
    /// making the balance check and the write atomic per account.
    pub async fn create_statement(
        &self,
        cmd: CreateStatementCommand,
    ) -> Result<Statement, LedgerError> {
        let kind = cmd
            .kind
            .parse::<OperationType>()
            .map_err(|_| LedgerError::InvalidOperationType)?;

        if cmd.amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let lock = self.locks.for_account(&cmd.account_id);
        let _guard = lock.lock().await;

        if self.accounts.get(&cmd.account_id).await?.is_none() {
            return Err(LedgerError::UserNotFound);
        }

        if kind == OperationType::Withdraw {
            let log = self.statements.list_by_account(&cmd.account_id).await?;
            let current = balance(&log);
            if cmd.amount > current {
                return Err(LedgerError::InsufficientFunds);
            }
        }

        let statement = Statement::new(&cmd.account_id, kind, cmd.amount, cmd.description);
        self.statements.append(&statement).await?;

        info!(
            "Created {} statement {} for account {} (amount {})",
            kind, statement.id, statement.account_id, statement.amount
        );
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Account;
    use crate::storage::MemoryStore;

    fn service() -> (Arc<MemoryStore>, LedgerService) {
        let store = Arc::new(MemoryStore::new());
        let service = LedgerService::new(store.clone(), store.clone());
        (store, service)
    }

    async fn with_account(store: &MemoryStore) -> Account {
        let account = Account::new("John".to_string(), "john@mail.com".to_string());
        store.create(&account).await.unwrap();
        account
    }

    fn cmd(account_id: &str, kind: &str, amount: i64) -> CreateStatementCommand {
        CreateStatementCommand {
            account_id: account_id.to_string(),
            kind: kind.to_string(),
            amount,
            description: kind.to_string(),
        }
    }

    #[tokio::test]
    async fn deposit_succeeds_and_increases_balance() {
        let (store, service) = service();
        let account = with_account(&store).await;

        let statement = service.create_statement(cmd(&account.id, "deposit", 100)).await.unwrap();
        assert_eq!(statement.kind, OperationType::Deposit);
        assert_eq!(statement.amount, 100);
        assert_eq!(statement.account_id, account.id);

        let log = store.list_by_account(&account.id).await.unwrap();
        assert_eq!(balance(&log), 100);
    }

    #[tokio::test]
    async fn unknown_account_is_rejected() {
        let (_, service) = service();
        let err = service.create_statement(cmd("not_found", "deposit", 300)).await.unwrap_err();
        assert!(matches!(err, LedgerError::UserNotFound));
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected_before_account_lookup() {
        let (store, service) = service();
        let account = with_account(&store).await;

        let err = service.create_statement(cmd(&account.id, "deposit", -100)).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount));

        let err = service.create_statement(cmd(&account.id, "deposit", 0)).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount));

        // amount check precedes existence check
        let err = service.create_statement(cmd("not_found", "withdraw", 0)).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount));
    }

    #[tokio::test]
    async fn unrecognized_kind_is_rejected_even_for_unknown_accounts() {
        let (_, service) = service();
        let err = service.create_statement(cmd("not_found", "transfer", 100)).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidOperationType));
    }

    #[tokio::test]
    async fn overdraw_is_rejected_and_appends_nothing() {
        let (store, service) = service();
        let account = with_account(&store).await;
        service.create_statement(cmd(&account.id, "deposit", 50)).await.unwrap();

        let err = service.create_statement(cmd(&account.id, "withdraw", 100)).await.unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds));

        let log = store.list_by_account(&account.id).await.unwrap();
        assert_eq!(log.len(), 1, "failed withdrawal must not append");
        assert_eq!(balance(&log), 50);
    }

    #[tokio::test]
    async fn withdrawing_the_exact_balance_leaves_zero() {
        let (store, service) = service();
        let account = with_account(&store).await;
        service.create_statement(cmd(&account.id, "deposit", 100)).await.unwrap();
        service.create_statement(cmd(&account.id, "withdraw", 100)).await.unwrap();

        let log = store.list_by_account(&account.id).await.unwrap();
        assert_eq!(balance(&log), 0);

        let err = service.create_statement(cmd(&account.id, "withdraw", 1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds));
    }

    #[tokio::test]
    async fn concurrent_withdrawals_cannot_overdraw() {
        let (store, service) = service();
        let service = Arc::new(service);
        let account = with_account(&store).await;
        service.create_statement(cmd(&account.id, "deposit", 100)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            let command = cmd(&account.id, "withdraw", 100);
            handles.push(tokio::spawn(async move {
                service.create_statement(command).await
            }));
        }

        let mut ok = 0;
        let mut insufficient = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(LedgerError::InsufficientFunds) => insufficient += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(ok, 1, "exactly one concurrent withdrawal may succeed");
        assert_eq!(insufficient, 7);

        let log = store.list_by_account(&account.id).await.unwrap();
        assert_eq!(balance(&log), 0);
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn accounts_do_not_contend_with_each_other() {
        let (store, service) = service();
        let a = with_account(&store).await;
        let b = Account::new("Jane".to_string(), "jane@mail.com".to_string());
        store.create(&b).await.unwrap();

        service.create_statement(cmd(&a.id, "deposit", 10)).await.unwrap();
        service.create_statement(cmd(&b.id, "deposit", 20)).await.unwrap();

        assert_eq!(balance(&store.list_by_account(&a.id).await.unwrap()), 10);
        assert_eq!(balance(&store.list_by_account(&b.id).await.unwrap()), 20);
    }
}
