//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params_from_iter, types::Value};
use time::UtcOffset;

use crate::{
    Error,
    month::month_index,
    stores::{CategoryCount, TransactionStore},
    transaction::{TRANSACTION_COLUMNS, Transaction, TransactionFilter, map_transaction_row},
};

/// Stores transactions in a SQLite database.
///
/// The table must have been created with [initialize_db](crate::initialize_db).
/// Transactions are returned in insertion order.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

/// Build the WHERE clause for `filter` along with its positional parameters.
fn where_clause(filter: &TransactionFilter) -> (String, Vec<Value>) {
    let mut clauses = vec!["sale_month = ?1".to_owned()];
    let mut parameters = vec![Value::Integer(month_index(filter.month).into())];

    if let Some(search) = &filter.search {
        parameters.push(Value::Text(format!(
            "%{}%",
            escape_like(&search.text().to_lowercase())
        )));
        let pattern = parameters.len();

        let mut alternatives = vec![
            format!("title_folded LIKE ?{pattern} ESCAPE '\\'"),
            format!("description_folded LIKE ?{pattern} ESCAPE '\\'"),
        ];

        if let Some(number) = search.number() {
            parameters.push(Value::Real(number));
            alternatives.push(format!("price = ?{}", parameters.len()));
        }

        clauses.push(format!("({})", alternatives.join(" OR ")));
    }

    if let Some(sold) = filter.sold {
        parameters.push(Value::Integer(sold.into()));
        clauses.push(format!("sold = ?{}", parameters.len()));
    }

    if let Some(range) = filter.price_range {
        parameters.push(Value::Real(range.min));
        clauses.push(format!("price >= ?{}", parameters.len()));

        if let Some(max) = range.max {
            parameters.push(Value::Real(max));
            clauses.push(format!("price < ?{}", parameters.len()));
        }
    }

    (format!("WHERE {}", clauses.join(" AND ")), parameters)
}

/// Escape the LIKE wildcards in `text` so that it is matched literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

fn to_sql_integer(value: u64) -> Value {
    Value::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}

impl TransactionStore for SQLiteTransactionStore {
    /// Count the transactions that match `filter`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count(&self, filter: &TransactionFilter) -> Result<u64, Error> {
        let (where_clause, parameters) = where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM \"transaction\" {where_clause}");

        let count: i64 = self.lock()?.query_row(
            &query,
            params_from_iter(parameters.iter()),
            |row| row.get(0),
        )?;

        Ok(count.unsigned_abs())
    }

    /// Get a page of transactions in insertion order.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn find_page(
        &self,
        filter: &TransactionFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error> {
        let (where_clause, mut parameters) = where_clause(filter);
        parameters.push(to_sql_integer(limit));
        let limit_parameter = parameters.len();
        parameters.push(to_sql_integer(offset));
        let offset_parameter = parameters.len();

        let query = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {where_clause} \
            ORDER BY rowid ASC LIMIT ?{limit_parameter} OFFSET ?{offset_parameter}"
        );

        self.lock()?
            .prepare(&query)?
            .query_map(params_from_iter(parameters.iter()), map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::from))
            .collect()
    }

    /// Sum the price of the matching transactions.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, Error> {
        let (where_clause, parameters) = where_clause(filter);
        // TOTAL returns 0.0 rather than NULL when no rows match.
        let query = format!("SELECT TOTAL(price) FROM \"transaction\" {where_clause}");

        let total = self.lock()?.query_row(
            &query,
            params_from_iter(parameters.iter()),
            |row| row.get(0),
        )?;

        Ok(total)
    }

    /// Count the matching transactions per category, in order of first appearance.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count_by_category(&self, filter: &TransactionFilter) -> Result<Vec<CategoryCount>, Error> {
        let (where_clause, parameters) = where_clause(filter);
        let query = format!(
            "SELECT category, COUNT(*) FROM \"transaction\" {where_clause} \
            GROUP BY category ORDER BY MIN(rowid) ASC"
        );

        self.lock()?
            .prepare(&query)?
            .query_map(params_from_iter(parameters.iter()), |row| {
                let count: i64 = row.get(1)?;

                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: count.unsigned_abs(),
                })
            })?
            .map(|category_result| category_result.map_err(Error::from))
            .collect()
    }

    /// Delete all transactions and insert `transactions` in a single database transaction.
    ///
    /// Nothing is changed if any insert fails.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateTransactionId] if two transactions share an ID,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn replace_all(&self, transactions: &[Transaction]) -> Result<usize, Error> {
        let connection = self.lock()?;
        let tx = connection.unchecked_transaction()?;

        let deleted = tx.execute("DELETE FROM \"transaction\"", ())?;
        tracing::debug!("Deleted {deleted} transactions");

        let mut statement = tx.prepare(
            "INSERT INTO \"transaction\"
                (id, title, price, description, category, image, sold, date_of_sale, sale_month,
                 title_folded, description_folded)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )?;

        for transaction in transactions {
            statement.execute((
                transaction.id,
                &transaction.title,
                transaction.price,
                &transaction.description,
                &transaction.category,
                &transaction.image,
                transaction.sold,
                transaction.date_of_sale.to_offset(UtcOffset::UTC),
                month_index(transaction.sale_month()),
                transaction.title.to_lowercase(),
                transaction.description.to_lowercase(),
            ))?;
        }

        drop(statement);
        tx.commit()?;

        Ok(transactions.len())
    }
}
