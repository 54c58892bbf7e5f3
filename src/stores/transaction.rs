//! Defines the transaction store trait.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter},
};

/// The queries the dashboard needs from wherever transactions are kept.
///
/// Implementations decide the natural order of transactions, but that order
/// must be stable so that paging through results is deterministic.
pub trait TransactionStore {
    /// Count the transactions that match `filter`.
    fn count(&self, filter: &TransactionFilter) -> Result<u64, Error>;

    /// Get up to `limit` transactions that match `filter`, skipping the first `offset`.
    fn find_page(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error>;

    /// Sum the price of the transactions that match `filter`.
    ///
    /// Returns zero if nothing matches.
    fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, Error>;

    /// Count the transactions that match `filter` for each category.
    ///
    /// Categories with no matching transactions are left out.
    fn count_by_category(&self, filter: &TransactionFilter) -> Result<Vec<CategoryCount>, Error>;

    /// Delete every transaction and then store `transactions`.
    ///
    /// Returns the number of transactions stored.
    fn replace_all(&self, transactions: &[Transaction]) -> Result<usize, Error>;
}

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// How many transactions belong to the category.
    pub count: u64,
}
