//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, db::initialize, pagination::PaginationConfig, seed::SeedConfig,
    stores::SQLiteTransactionStore,
};

/// The state of the REST server.
///
/// Handlers take the parts they need through their own state types, e.g.
/// [TransactionsState](crate::transaction::TransactionsState).
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls the default page of transactions.
    pub pagination_config: PaginationConfig,

    /// Where to get the seed data from.
    pub seed_config: SeedConfig,

    /// The client used to download the seed data.
    pub http_client: reqwest::Client,

    /// The store for transactions.
    pub transaction_store: SQLiteTransactionStore,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the transaction table.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        pagination_config: PaginationConfig,
        seed_config: SeedConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            pagination_config,
            seed_config,
            http_client: reqwest::Client::new(),
            transaction_store: SQLiteTransactionStore::new(connection.clone()),
            db_connection: connection,
        })
    }
}
