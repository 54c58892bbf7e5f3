//! Contains the trait and implementation for the object that stores [transactions](crate::Transaction).

mod transaction;

pub mod sqlite;

pub use sqlite::SQLiteTransactionStore;
pub use transaction::{CategoryCount, TransactionStore};
