#![allow(missing_docs)]

use rusqlite::Connection;

use crate::{
    AppState, pagination::PaginationConfig, seed::SeedConfig, stores::TransactionStore,
    transaction::Transaction,
};

/// Create an [AppState] backed by an empty in-memory database.
///
/// The seed URL points at the reference dataset, tests that reseed should
/// replace it with a local server.
pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(
        connection,
        PaginationConfig::default(),
        SeedConfig::default(),
    )
    .expect("Could not create app state")
}

#[track_caller]
pub(crate) fn seed_test_store(state: &AppState, transactions: &[Transaction]) {
    state
        .transaction_store
        .replace_all(transactions)
        .expect("Could not seed test store");
}
