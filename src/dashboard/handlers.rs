//! HTTP handlers for the dashboard reports.

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};

use crate::{
    AppState, Error,
    month::MonthQuery,
    stores::{CategoryCount, SQLiteTransactionStore},
};

use super::aggregation::{
    PriceRangeCount, SalesStatistics, get_category_distribution, get_price_histogram,
    get_sales_statistics,
};

/// The state needed for the dashboard reports.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store to read transactions from.
    pub transaction_store: SQLiteTransactionStore,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// Get the sales totals for the requested month.
pub async fn get_statistics(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<SalesStatistics>, Error> {
    let Query(query) = query?;
    let month = query.month()?;

    get_sales_statistics(&state.transaction_store, month)
        .inspect_err(|error| tracing::error!("could not get statistics for {month}: {error}"))
        .map(Json)
}

/// Get the price histogram for the requested month.
pub async fn get_bar_chart(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let Query(query) = query?;
    let month = query.month()?;

    get_price_histogram(&state.transaction_store, month)
        .inspect_err(|error| tracing::error!("could not get price histogram for {month}: {error}"))
        .map(Json)
}

/// Get the number of transactions per category for the requested month.
pub async fn get_pie_chart(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let Query(query) = query?;
    let month = query.month()?;

    get_category_distribution(&state.transaction_store, month)
        .inspect_err(|error| {
            tracing::error!("could not get category distribution for {month}: {error}")
        })
        .map(Json)
}
