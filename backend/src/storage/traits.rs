//! Storage abstraction traits.
//!
//! The domain layer works against these capability interfaces so different
//! backends (the in-memory log, SQLite) are interchangeable. Missing rows are
//! `Ok(None)`; only real persistence failures are `Err`.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Account, Statement};

/// Append-only, ordered storage of statements, keyed by account.
#[async_trait]
pub trait StatementStore: Send + Sync {
    /// Persist a new statement. All-or-nothing: on error nothing is written.
    async fn append(&self, statement: &Statement) -> Result<()>;

    /// All statements for the account in creation order; empty vec if the
    /// account has none.
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Statement>>;

    /// Fetch a single statement by id.
    async fn get(&self, statement_id: &str) -> Result<Option<Statement>>;
}

/// Account lookup and creation.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account.
    async fn create(&self, account: &Account) -> Result<()>;

    /// Fetch an account by id.
    async fn get(&self, account_id: &str) -> Result<Option<Account>>;

    /// Fetch an account by email (for duplicate checks at registration).
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;
}
