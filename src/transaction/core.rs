//! Defines the transaction record and its database table.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Month, OffsetDateTime, UtcOffset};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
///
/// IDs come from the seed dataset, the store never assigns them.
pub type TransactionId = i64;

/// A product listing and whether it sold, as served by the transactions API.
///
/// Serializes with camel case field names, e.g. `dateOfSale`, to match the
/// seed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// The listed price of the product.
    pub price: f64,
    /// A longer text description of the product.
    pub description: String,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL to a picture of the product.
    pub image: Option<String>,
    /// Whether the product has been sold.
    pub sold: bool,
    /// When the product was sold (or listed, for unsold products).
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(id: TransactionId, price: f64, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            id,
            title: format!("Product #{id}"),
            price,
            description: String::new(),
            category: "uncategorized".to_owned(),
            image: None,
            sold: false,
            date_of_sale,
        }
    }

    /// The calendar month of the sale in UTC.
    ///
    /// Month filters only look at this value, the year is ignored.
    pub fn sale_month(&self) -> Month {
        self.date_of_sale.to_offset(UtcOffset::UTC).month()
    }
}

/// A builder for creating [Transaction] instances with sensible defaults.
///
/// # Examples
///
/// ```
/// use time::macros::datetime;
///
/// use sales_dashboard::Transaction;
///
/// let transaction = Transaction::build(1, 329.85, datetime!(2022-03-27 14:59:54 UTC))
///     .title("Mens Casual Premium Slim Fit T-Shirts")
///     .category("men's clothing")
///     .sold(true)
///     .finalise();
///
/// assert_eq!(transaction.sale_month(), time::Month::March);
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: TransactionId,
    title: String,
    price: f64,
    description: String,
    category: String,
    image: Option<String>,
    sold: bool,
    date_of_sale: OffsetDateTime,
}

impl TransactionBuilder {
    /// Set the product name.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Set the product description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the product category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the URL of the product image.
    pub fn image(mut self, image: Option<&str>) -> Self {
        self.image = image.map(str::to_owned);
        self
    }

    /// Set whether the product has been sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Create the [Transaction].
    pub fn finalise(self) -> Transaction {
        Transaction {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            sold: self.sold,
            date_of_sale: self.date_of_sale,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected by [map_transaction_row], in order.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, price, description, category, image, sold, date_of_sale";

/// Create the transaction table in the database.
///
/// `sale_month` duplicates the UTC month of `date_of_sale` so that month
/// filters can use an index. `title_folded` and `description_folded` hold the
/// lower-cased text that searches are matched against, since SQLite's `LIKE`
/// only ignores case for ASCII letters.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER NOT NULL UNIQUE,
                title TEXT NOT NULL,
                price REAL NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                image TEXT,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12),
                title_folded TEXT NOT NULL,
                description_folded TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_sale_month ON \"transaction\"(sale_month);",
        (),
    )?;

    Ok(())
}

/// Map a database row selected with [TRANSACTION_COLUMNS] to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}
