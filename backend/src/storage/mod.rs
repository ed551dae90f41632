//! Storage layer: capability traits plus the in-memory and SQLite backends.

pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryStore;
pub use sqlite::{SqliteAccountStore, SqliteStatementStore};
pub use traits::{AccountStore, StatementStore};
