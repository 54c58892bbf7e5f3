//! Contains the SQLite backend for the stores.

pub mod transaction;

pub use transaction::SQLiteTransactionStore;
