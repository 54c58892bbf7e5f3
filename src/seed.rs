//! Fills the store with the reference dataset.
//!
//! Seeding downloads a JSON array of transactions and then replaces
//! everything in the store with it. The download and parse finish before the
//! store is touched, so a bad source never leaves the store half empty.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    stores::{SQLiteTransactionStore, TransactionStore},
    transaction::Transaction,
};

/// The reference dataset used when no other source is configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The message returned after the store has been reseeded.
pub const SEED_SUCCESS_MESSAGE: &str = "Database initialized successfully";

/// Where to get the seed data from.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// The URL of a JSON array of transactions.
    pub source_url: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SEED_URL.to_owned(),
        }
    }
}

/// Download and parse the seed dataset at `url`.
///
/// # Errors
/// Returns an [Error::SeedFetch] if the request fails or the server responds
/// with a non-success status, or an [Error::SeedParse] if the body is not a
/// JSON array of transactions.
pub async fn fetch_seed_data(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Transaction>, Error> {
    tracing::debug!("fetching seed data from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|error| Error::SeedFetch(error.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::SeedFetch(format!("{url} responded with {status}")));
    }

    let body = response
        .bytes()
        .await
        .map_err(|error| Error::SeedFetch(error.to_string()))?;

    parse_seed_document(&body)
}

/// Parse a JSON array of transactions.
///
/// Unknown fields are ignored and `image` may be missing or null.
///
/// # Errors
/// Returns an [Error::SeedParse] if `document` is not a JSON array of transactions.
pub fn parse_seed_document(document: &[u8]) -> Result<Vec<Transaction>, Error> {
    serde_json::from_slice(document).map_err(|error| Error::SeedParse(error.to_string()))
}

/// Replace everything in `store` with `transactions`.
///
/// Returns the number of transactions stored.
///
/// # Errors
/// Returns an [Error::DuplicateTransactionId] if two transactions share an ID,
/// or any other error from `store`. The store is unchanged on error.
pub fn seed_store(
    store: &impl TransactionStore,
    transactions: &[Transaction],
) -> Result<usize, Error> {
    let count = store.replace_all(transactions)?;
    tracing::info!("seeded store with {count} transactions");

    Ok(count)
}

/// Download the dataset at `url` and replace everything in `store` with it.
///
/// # Errors
/// See [fetch_seed_data] and [seed_store].
pub async fn seed_from_url(
    client: &reqwest::Client,
    store: &impl TransactionStore,
    url: &str,
) -> Result<usize, Error> {
    let transactions = fetch_seed_data(client, url).await?;
    seed_store(store, &transactions)
}

/// The state needed to reseed the store.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The store to replace the contents of.
    pub transaction_store: SQLiteTransactionStore,
    /// Where to download the dataset from.
    pub seed_config: SeedConfig,
    /// The client used to download the dataset.
    pub http_client: reqwest::Client,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            seed_config: state.seed_config.clone(),
            http_client: state.http_client.clone(),
        }
    }
}

/// The body of a successful seed response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SeedResponse {
    /// Always [SEED_SUCCESS_MESSAGE].
    pub message: String,
}

/// Replace the store contents with the configured dataset.
pub async fn initialize_database(
    State(state): State<SeedState>,
) -> Result<Json<SeedResponse>, Error> {
    seed_from_url(
        &state.http_client,
        &state.transaction_store,
        &state.seed_config.source_url,
    )
    .await
    .inspect_err(|error| tracing::error!("could not seed the database: {error}"))?;

    Ok(Json(SeedResponse {
        message: SEED_SUCCESS_MESSAGE.to_owned(),
    }))
}
