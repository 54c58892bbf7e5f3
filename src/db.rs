//! Sets up the application's database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Create all the tables needed by the application.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
