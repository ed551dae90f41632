//! Account registration and profile lookup.
//!
//! Credentials and token issuance belong to the auth gateway in front of this
//! service; an account here is just the identity the ledger attaches
//! statements to.

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::AccountError;
use crate::domain::models::Account;
use crate::storage::traits::AccountStore;

#[derive(Debug, Clone)]
pub struct CreateAccountCommand {
    pub name: String,
    pub email: String,
}

pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Register a new account. Emails are unique across accounts.
    pub async fn create_account(
        &self,
        cmd: CreateAccountCommand,
    ) -> Result<Account, AccountError> {
        if cmd.name.trim().is_empty() || cmd.email.trim().is_empty() {
            return Err(AccountError::MissingFields);
        }
        if !is_plausible_email(&cmd.email) {
            return Err(AccountError::InvalidEmail);
        }

        if self.accounts.find_by_email(&cmd.email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let account = Account::new(cmd.name, cmd.email);
        self.accounts.create(&account).await?;

        info!("Created account {} ({})", account.id, account.email);
        Ok(account)
    }

    /// Fetch an account profile by id.
    pub async fn get_account(&self, account_id: &str) -> Result<Account, AccountError> {
        self.accounts
            .get(account_id)
            .await?
            .ok_or(AccountError::NotFound)
    }
}

/// Minimal shape check: one `@` with non-empty local part and a domain that
/// contains a dot. Real deliverability checks are the gateway's problem.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> AccountService {
        AccountService::new(Arc::new(MemoryStore::new()))
    }

    fn cmd(name: &str, email: &str) -> CreateAccountCommand {
        CreateAccountCommand {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_and_fetches_an_account() {
        let service = service();
        let account = service.create_account(cmd("John", "john@mail.com")).await.unwrap();
        assert_eq!(account.name, "John");
        assert!(!account.id.is_empty());

        let fetched = service.get_account(&account.id).await.unwrap();
        assert_eq!(fetched, account);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let service = service();
        service.create_account(cmd("John", "john@mail.com")).await.unwrap();

        let err = service.create_account(cmd("Johnny", "john@mail.com")).await.unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let service = service();
        let err = service.create_account(cmd("", "john@mail.com")).await.unwrap_err();
        assert!(matches!(err, AccountError::MissingFields));

        let err = service.create_account(cmd("John", "  ")).await.unwrap_err();
        assert!(matches!(err, AccountError::MissingFields));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let service = service();
        for email in ["no-at-sign", "@mail.com", "john@nodot", "john@.com"] {
            let err = service.create_account(cmd("John", email)).await.unwrap_err();
            assert!(matches!(err, AccountError::InvalidEmail), "email: {email}");
        }
    }

    #[tokio::test]
    async fn unknown_account_lookup_fails() {
        let service = service();
        let err = service.get_account("not_found").await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound));
    }
}
