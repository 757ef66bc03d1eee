//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error, db::initialize, pagination::PaginationConfig, stores::TransactionStore,
    stores::sqlite::SQLiteTransactionStore,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore,
{
    /// The store for the sale [transactions](crate::Transaction).
    pub transaction_store: T,
    /// The client used to fetch the seed document.
    pub http_client: reqwest::Client,
    /// The URL of the JSON document the store is seeded from.
    pub seed_url: String,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState<SQLiteTransactionStore> {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        seed_url: &str,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self::with_store(
            SQLiteTransactionStore::new(connection),
            seed_url,
            local_timezone,
            pagination_config,
        ))
    }
}

impl<T> AppState<T>
where
    T: TransactionStore,
{
    /// Create a new [AppState] around an existing `transaction_store`.
    pub fn with_store(
        transaction_store: T,
        seed_url: &str,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            transaction_store,
            http_client: reqwest::Client::new(),
            seed_url: seed_url.to_owned(),
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        }
    }
}

/// The state needed to seed the transaction store.
#[derive(Debug, Clone)]
pub struct SeedState<T>
where
    T: TransactionStore,
{
    /// The store to replace the contents of.
    pub transaction_store: T,
    /// The client used to fetch the seed document.
    pub http_client: reqwest::Client,
    /// The URL of the JSON document to seed from.
    pub seed_url: String,
}

impl<T> FromRef<AppState<T>> for SeedState<T>
where
    T: TransactionStore,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.seed_url.clone(),
        }
    }
}

/// The state needed to query transactions and their statistics.
#[derive(Debug, Clone)]
pub struct QueryState<T>
where
    T: TransactionStore,
{
    /// The store to read transactions from.
    pub transaction_store: T,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl<T> FromRef<AppState<T>> for QueryState<T>
where
    T: TransactionStore,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
