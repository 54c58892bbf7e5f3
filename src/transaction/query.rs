//! Turns a month, search text and page into a page of matching transactions.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{Error, pagination::Page, stores::TransactionStore};

use super::{SearchTerm, Transaction, TransactionFilter};

/// A validated request for one page of a month's transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsRequest {
    /// Only list transactions sold in this month.
    pub month: Month,
    /// Only list transactions that match this search term.
    pub search: Option<SearchTerm>,
    /// The page of results to return.
    pub page: Page,
}

impl TransactionsRequest {
    /// The predicate that selects the transactions for this request.
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter::for_month(self.month).with_search(self.search.clone())
    }
}

/// One page of transactions plus what is needed to page through the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on this page, at most the page size.
    pub transactions: Vec<Transaction>,
    /// The 1-based number of this page.
    pub current_page: u64,
    /// The number of pages needed to show all matching transactions.
    pub total_pages: u64,
    /// The number of matching transactions across all pages.
    pub total: u64,
}

/// Get the page of transactions described by `request`.
///
/// # Errors
/// Returns any error from `store` unchanged.
pub fn list_transactions(
    store: &impl TransactionStore,
    request: &TransactionsRequest,
) -> Result<TransactionPage, Error> {
    let filter = request.filter();

    let total = store.count(&filter)?;
    let transactions = store.find_page(&filter, request.page.offset(), request.page.size())?;

    Ok(TransactionPage {
        transactions,
        current_page: request.page.number(),
        total_pages: request.page.page_count(total),
        total,
    })
}
