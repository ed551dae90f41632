//! Domain layer: models, the ledger write path, and the read side.

pub mod account_service;
pub mod balance;
pub mod errors;
pub mod ledger_service;
pub mod models;
pub mod query_service;

pub use account_service::{AccountService, CreateAccountCommand};
pub use balance::balance;
pub use errors::{AccountError, LedgerError};
pub use ledger_service::{CreateStatementCommand, LedgerService};
pub use query_service::{BalanceSummary, QueryService};
