//! Defines the route handler that lists a month's transactions page by page.

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    month::resolve_month,
    pagination::{Page, PaginationConfig},
    stores::SQLiteTransactionStore,
};

use super::{
    SearchTerm,
    query::{TransactionPage, TransactionsRequest, list_transactions},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The store to read transactions from.
    pub transaction_store: SQLiteTransactionStore,
    /// The page defaults for requests that leave them out.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string for the transactions endpoint.
///
/// e.g. `?month=March&search=jacket&page=2&perPage=10`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    /// The English name of the month to list.
    pub month: Option<String>,
    /// Text to look for in the title, description or price.
    pub search: Option<String>,
    /// The 1-based page number.
    pub page: Option<u64>,
    /// The maximum number of transactions per page.
    pub per_page: Option<u64>,
}

impl TransactionsQuery {
    fn into_request(self, config: &PaginationConfig) -> Result<TransactionsRequest, Error> {
        Ok(TransactionsRequest {
            month: resolve_month(self.month.as_deref())?,
            search: self.search.as_deref().and_then(SearchTerm::parse),
            page: Page::from_request(self.page, self.per_page, config)?,
        })
    }
}

/// List the transactions sold in a month, optionally filtered by a search term.
pub async fn get_transactions(
    State(state): State<TransactionsState>,
    query: Result<Query<TransactionsQuery>, QueryRejection>,
) -> Result<Json<TransactionPage>, Error> {
    let Query(query) = query?;
    let request = query.into_request(&state.pagination_config)?;

    let page = list_transactions(&state.transaction_store, &request)
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(Json(page))
}
