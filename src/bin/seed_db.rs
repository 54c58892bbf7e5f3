use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{
    AppState, PaginationConfig,
    seed::{DEFAULT_SEED_URL, SeedConfig, fetch_seed_data, parse_seed_document, seed_store},
};

/// A utility for loading the transaction dataset into a sales dashboard database.
///
/// Anything already in the database is replaced.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database, created if it does not exist.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: String,

    /// A URL or a path to a JSON file containing an array of transactions.
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    source: String,
}

/// Load the dataset and replace the contents of the database with it.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let db_path = Path::new(&args.db_path);

    match db_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Database path must include a file extension (e.g., 'sales.db').");
            exit(1);
        }
    }

    let source_path = Path::new(&args.source);
    let transactions = if source_path.is_file() {
        println!("Reading transactions from {source_path:#?}");
        parse_seed_document(&std::fs::read(source_path)?)?
    } else {
        println!("Downloading transactions from {}", args.source);
        fetch_seed_data(&reqwest::Client::new(), &args.source).await?
    };

    println!("Opening database at {db_path:#?}");
    let conn = Connection::open(db_path)?;
    let state = AppState::new(
        conn,
        PaginationConfig::default(),
        SeedConfig {
            source_url: args.source.clone(),
        },
    )?;

    let count = seed_store(&state.transaction_store, &transactions)?;

    println!("Success! Stored {count} transactions.");

    Ok(())
}
