//! Defines the sale transaction model and its database table.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::database_id::DatabaseId;

// ============================================================================
// MODELS
// ============================================================================

/// A product listed for sale, and whether it was sold.
///
/// Transactions are only ever created in bulk by seeding the store, see
/// [crate::TransactionStore::replace_all].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, in insertion order.
    pub id: DatabaseId,
    /// The product's name.
    pub title: String,
    /// A longer text description of the product.
    pub description: Option<String>,
    /// The price the product was listed for.
    pub price: f64,
    /// When the product was sold (or listed, if it was not sold).
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// Whether the product was sold.
    pub sold: bool,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL to a picture of the product.
    pub image: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> NewTransaction {
        NewTransaction {
            title: title.to_owned(),
            description: None,
            price,
            date_of_sale,
            sold: true,
            category: "uncategorised".to_owned(),
            image: None,
        }
    }
}

/// A transaction that has not been inserted into the store yet.
///
/// This is the shape of each object in the seed document. Fields the store
/// does not keep (e.g. the upstream `id`) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The product's name.
    pub title: String,
    /// A longer text description of the product.
    #[serde(default)]
    pub description: Option<String>,
    /// The price the product was listed for.
    pub price: f64,
    /// When the product was sold, as an RFC 3339 timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// Whether the product was sold.
    pub sold: bool,
    /// The product category.
    pub category: String,
    /// A URL to a picture of the product.
    #[serde(default)]
    pub image: Option<String>,
}

impl NewTransaction {
    /// Set the description of the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Set whether the product was sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Set the category of the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// Sale dates are stored as UTC unix timestamps so that month ranges can be
/// compared numerically.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                price REAL NOT NULL,
                date_of_sale INTEGER NOT NULL,
                sold INTEGER NOT NULL,
                category TEXT NOT NULL,
                image TEXT
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_of_sale ON \"transaction\"(date_of_sale);",
        (),
    )?;

    Ok(())
}

/// The columns to select for [map_transaction_row], in order.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, date_of_sale, sold, category, image";

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let timestamp: i64 = row.get(4)?;
    let date_of_sale = OffsetDateTime::from_unix_timestamp(timestamp).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(error))
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        date_of_sale,
        sold: row.get(5)?,
        category: row.get(6)?,
        image: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
