pub mod account;
pub mod statement;

pub use account::Account;
pub use statement::{OperationType, Statement};
