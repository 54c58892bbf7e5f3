//! Sales Dashboard is the backend for a small transaction analytics dashboard.
//!
//! This library provides a JSON API that:
//! - seeds a SQLite store with a reference dataset of product transactions,
//! - lists a month's transactions page by page with free text search,
//! - reports a month's sales totals, price histogram and category breakdown.
//!
//! Every report is scoped to a calendar month given by its English name,
//! e.g. `?month=March`, regardless of the year.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
pub mod dashboard;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod month;
mod pagination;
mod routing;
pub mod seed;
mod stores;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorResponse};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::parse_month;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use stores::{CategoryCount, SQLiteTransactionStore, TransactionStore};
pub use transaction::{Transaction, TransactionBuilder, TransactionFilter};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
