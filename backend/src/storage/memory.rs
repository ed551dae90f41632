//! In-memory storage backend.
//!
//! Intended for tests and dev. Statements live in per-account append-only
//! vectors, so list order is creation order by construction.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::domain::models::{Account, Statement};
use crate::storage::traits::{AccountStore, StatementStore};

/// In-memory implementation of both storage traits.
#[derive(Default)]
pub struct MemoryStore {
    statements: RwLock<HashMap<String, Vec<Statement>>>,
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatementStore for MemoryStore {
    async fn append(&self, statement: &Statement) -> Result<()> {
        let mut streams = self
            .statements
            .write()
            .map_err(|_| anyhow!("statement lock poisoned"))?;
        streams
            .entry(statement.account_id.clone())
            .or_default()
            .push(statement.clone());
        Ok(())
    }

    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Statement>> {
        let streams = self
            .statements
            .read()
            .map_err(|_| anyhow!("statement lock poisoned"))?;
        Ok(streams.get(account_id).cloned().unwrap_or_default())
    }

    async fn get(&self, statement_id: &str) -> Result<Option<Statement>> {
        let streams = self
            .statements
            .read()
            .map_err(|_| anyhow!("statement lock poisoned"))?;
        Ok(streams
            .values()
            .flatten()
            .find(|s| s.id == statement_id)
            .cloned())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create(&self, account: &Account) -> Result<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| anyhow!("account lock poisoned"))?;
        accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn get(&self, account_id: &str) -> Result<Option<Account>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| anyhow!("account lock poisoned"))?;
        Ok(accounts.get(account_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| anyhow!("account lock poisoned"))?;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }
}
