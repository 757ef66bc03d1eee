use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, macros::datetime};

use sales_dashboard::{
    NewTransaction, SQLiteTransactionStore, Transaction, TransactionStore, initialize_db,
};

/// A utility for creating a test database for the sales dashboard server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The number of transactions to generate.
    #[arg(long, short, default_value_t = 60)]
    count: usize,
}

const PRODUCTS: [(&str, &str, f64); 8] = [
    ("Fjallraven Backpack", "men's clothing", 109.95),
    ("Slim Fit T-Shirt", "men's clothing", 22.3),
    ("Cotton Jacket", "men's clothing", 55.99),
    ("Silver Dragon Bracelet", "jewelery", 695.0),
    ("Solid Gold Petite Micropave", "jewelery", 168.0),
    ("Portable External Hard Drive", "electronics", 64.0),
    ("27 inch Curved Gaming Monitor", "electronics", 999.99),
    ("Rain Jacket Windbreaker", "women's clothing", 39.99),
];

/// Create `count` transactions spread over 2021 and 2022.
fn sample_transactions(count: usize) -> Vec<NewTransaction> {
    let start = datetime!(2021-01-03 10:30 UTC);

    (0..count)
        .map(|i| {
            let (title, category, price) = PRODUCTS[i % PRODUCTS.len()];
            // Step by a prime number of days so every month gets a mix of products.
            let date_of_sale = start + Duration::days((i as i64 * 13) % 720);

            Transaction::build(title, price, date_of_sale)
                .description(&format!("{title}, sample item {}", i + 1))
                .category(category)
                .sold(i % 3 != 0)
        })
        .collect()
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating {} test transactions...", args.count);

    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));
    let inserted = store.replace_all(sample_transactions(args.count))?;

    println!("Success! Inserted {inserted} transactions.");

    Ok(())
}
