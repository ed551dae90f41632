//! SQLite-backed storage.
//!
//! Rows keep timestamps as RFC 3339 text and amounts as integers. A statement
//! append is a single INSERT, so it is atomic: either the row is durable or
//! nothing was written.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::DbConnection;
use crate::domain::models::{Account, OperationType, Statement};
use crate::storage::traits::{AccountStore, StatementStore};

/// Statement log persisted in the `statements` table.
#[derive(Clone)]
pub struct SqliteStatementStore {
    db: DbConnection,
}

impl SqliteStatementStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| anyhow!("malformed timestamp '{}': {}", raw, e))?
        .with_timezone(&Utc))
}

fn statement_from_row(row: &SqliteRow) -> Result<Statement> {
    let kind_raw: String = row.get("kind");
    let kind = kind_raw
        .parse::<OperationType>()
        .map_err(|e| anyhow!("corrupt statement row: {}", e))?;
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Statement {
        id: row.get("id"),
        account_id: row.get("account_id"),
        kind,
        amount: row.get("amount"),
        description: row.get("description"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[async_trait]
impl StatementStore for SqliteStatementStore {
    async fn append(&self, statement: &Statement) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO statements (id, account_id, kind, amount, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&statement.id)
        .bind(&statement.account_id)
        .bind(statement.kind.as_str())
        .bind(statement.amount)
        .bind(&statement.description)
        .bind(statement.created_at.to_rfc3339())
        .bind(statement.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Statement>> {
        // rowid order is insertion order; created_at alone is not unique
        // enough at millisecond granularity
        let rows = sqlx::query(
            "SELECT id, account_id, kind, amount, description, created_at, updated_at
             FROM statements WHERE account_id = ? ORDER BY rowid",
        )
        .bind(account_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(statement_from_row).collect()
    }

    async fn get(&self, statement_id: &str) -> Result<Option<Statement>> {
        let row = sqlx::query(
            "SELECT id, account_id, kind, amount, description, created_at, updated_at
             FROM statements WHERE id = ?",
        )
        .bind(statement_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(statement_from_row).transpose()
    }
}

/// Accounts persisted in the `accounts` table.
#[derive(Clone)]
pub struct SqliteAccountStore {
    db: DbConnection,
}

impl SqliteAccountStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn account_from_row(row: &SqliteRow) -> Result<Account> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    Ok(Account {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn create(&self, account: &Account) -> Result<()> {
        sqlx::query(
            "INSERT INTO accounts (id, name, email, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.created_at.to_rfc3339())
        .bind(account.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get(&self, account_id: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, name, email, created_at, updated_at FROM accounts WHERE id = ?",
        )
        .bind(account_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, name, email, created_at, updated_at FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(account_from_row).transpose()
    }
}
