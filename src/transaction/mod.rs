//! Transactions and the query that lists them.
//!
//! This module contains everything related to listing transactions:
//! - The `Transaction` model and its database table
//! - The filter predicate shared by the store and the dashboard
//! - The paginated, searchable transactions endpoint

mod core;
mod filter;
mod query;
mod transactions_endpoint;

pub use core::{
    Transaction, TransactionBuilder, TransactionId, create_transaction_table, map_transaction_row,
};
pub(crate) use core::TRANSACTION_COLUMNS;
pub use filter::{PriceRange, SearchTerm, TransactionFilter};
pub use query::{TransactionPage, TransactionsRequest, list_transactions};
pub use transactions_endpoint::{TransactionsQuery, TransactionsState, get_transactions};
