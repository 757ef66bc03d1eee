use std::sync::{Arc, RwLock};

use rusqlite::Connection;

use crate::{
    AppState, Error,
    pagination::PaginationConfig,
    stores::{TransactionQuery, TransactionStore, sqlite::SQLiteTransactionStore},
    transaction::{NewTransaction, Transaction},
};

/// A [TransactionStore] that keeps transactions in a vector, for testing
/// code that only depends on the store trait.
#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

/// The text SQLite produces when casting a REAL price to TEXT.
pub(crate) fn price_text(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{price:.1}")
    } else {
        price.to_string()
    }
}

fn matches(query: &TransactionQuery, transaction: &Transaction) -> bool {
    let matches_search = query.search.as_deref().is_none_or(|search| {
        let search = search.to_lowercase();
        transaction.title.to_lowercase().contains(&search)
            || transaction
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&search))
            || price_text(transaction.price).contains(&search)
    });

    let matches_date = query
        .date_range
        .as_ref()
        .is_none_or(|range| range.contains(&transaction.date_of_sale));

    matches_search && matches_date
}

impl TransactionStore for InMemoryTransactionStore {
    fn replace_all(&self, transactions: Vec<NewTransaction>) -> Result<usize, Error> {
        let mut stored = self
            .transactions
            .write()
            .map_err(|_| Error::DatabaseLockError)?;

        *stored = transactions
            .into_iter()
            .zip(1..)
            .map(|(transaction, id)| Transaction {
                id,
                title: transaction.title,
                description: transaction.description,
                price: transaction.price,
                date_of_sale: transaction.date_of_sale,
                sold: transaction.sold,
                category: transaction.category,
                image: transaction.image,
            })
            .collect();

        Ok(stored.len())
    }

    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let stored = self
            .transactions
            .read()
            .map_err(|_| Error::DatabaseLockError)?;

        Ok(stored
            .iter()
            .filter(|transaction| matches(query, transaction))
            .skip(query.offset as usize)
            .take(query.limit.map_or(usize::MAX, |limit| limit as usize))
            .cloned()
            .collect())
    }

    fn count(&self, query: &TransactionQuery) -> Result<u64, Error> {
        let stored = self
            .transactions
            .read()
            .map_err(|_| Error::DatabaseLockError)?;

        Ok(stored
            .iter()
            .filter(|transaction| matches(query, transaction))
            .count() as u64)
    }
}

/// An [AppState] around an empty [InMemoryTransactionStore], in UTC.
pub(crate) fn test_state(seed_url: &str) -> AppState<InMemoryTransactionStore> {
    AppState::with_store(
        InMemoryTransactionStore::default(),
        seed_url,
        "Etc/UTC",
        PaginationConfig::default(),
    )
}

/// An [AppState] around an empty in-memory SQLite database, in UTC.
pub(crate) fn sqlite_state(seed_url: &str) -> AppState<SQLiteTransactionStore> {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection, seed_url, "Etc/UTC", PaginationConfig::default())
        .expect("Could not initialize database.")
}
