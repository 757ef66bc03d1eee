//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, named_params};

use crate::{
    Error,
    stores::{TransactionQuery, TransactionStore},
    transaction::{NewTransaction, TRANSACTION_COLUMNS, Transaction, map_transaction_row},
};

/// Stores transactions in a SQLite database.
///
/// The `transaction` table must exist, see [crate::initialize_db].
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

/// The filter shared by [SQLiteTransactionStore::get_query] and [SQLiteTransactionStore::count].
///
/// Text columns go through `fold_case` (see [crate::db::initialize]) so that
/// the search ignores case beyond ASCII.
const WHERE_CLAUSE: &str = "WHERE (:search IS NULL \
        OR fold_case(title) LIKE :search ESCAPE '\\' \
        OR fold_case(description) LIKE :search ESCAPE '\\' \
        OR CAST(price AS TEXT) LIKE :search ESCAPE '\\') \
    AND (:start IS NULL OR date_of_sale >= :start) \
    AND (:end IS NULL OR date_of_sale < :end)";

/// Turn `search` into a lower-case `LIKE` pattern that matches it anywhere in a string.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}

struct QueryParams {
    search: Option<String>,
    start: Option<i64>,
    end: Option<i64>,
}

impl From<&TransactionQuery> for QueryParams {
    fn from(query: &TransactionQuery) -> Self {
        Self {
            search: query.search.as_deref().map(like_pattern),
            start: query
                .date_range
                .as_ref()
                .map(|range| range.start.unix_timestamp()),
            end: query
                .date_range
                .as_ref()
                .map(|range| range.end.unix_timestamp()),
        }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Replace every transaction inside a single SQL transaction.
    ///
    /// The connection lock is held for the whole delete and insert, so readers
    /// never see a partially seeded table. If any insert fails, the previous
    /// transactions are kept.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error,
    /// or [Error::DatabaseLockError] if the connection lock is poisoned.
    fn replace_all(&self, transactions: Vec<NewTransaction>) -> Result<usize, Error> {
        let mut connection = self.lock()?;
        let sql_transaction = connection.transaction()?;

        sql_transaction.execute("DELETE FROM \"transaction\"", ())?;
        // Restart the IDs so that they reflect the order of the seed document.
        sql_transaction.execute("DELETE FROM sqlite_sequence WHERE name = 'transaction'", ())?;

        {
            let mut statement = sql_transaction.prepare(
                "INSERT INTO \"transaction\" (title, description, price, date_of_sale, sold, category, image)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;

            for transaction in &transactions {
                statement.execute((
                    &transaction.title,
                    &transaction.description,
                    transaction.price,
                    transaction.date_of_sale.unix_timestamp(),
                    transaction.sold,
                    &transaction.category,
                    &transaction.image,
                ))?;
            }
        }

        sql_transaction.commit()?;

        Ok(transactions.len())
    }

    /// Retrieve the transactions matching `query`, ordered by ID.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error,
    /// or [Error::DatabaseLockError] if the connection lock is poisoned.
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;
        let params = QueryParams::from(query);
        // A negative limit means "no limit" in SQLite.
        let limit = query
            .limit
            .map_or(-1, |limit| i64::try_from(limit).unwrap_or(i64::MAX));
        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);

        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" {WHERE_CLAUSE} \
            ORDER BY id ASC LIMIT :limit OFFSET :offset"
        );

        connection
            .prepare(&sql)?
            .query_map(
                named_params! {
                    ":search": params.search,
                    ":start": params.start,
                    ":end": params.end,
                    ":limit": limit,
                    ":offset": offset,
                },
                map_transaction_row,
            )?
            .map(|transaction_result| transaction_result.map_err(Error::from))
            .collect()
    }

    /// Count the transactions matching the filters of `query`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL error,
    /// or [Error::DatabaseLockError] if the connection lock is poisoned.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error> {
        let connection = self.lock()?;
        let params = QueryParams::from(query);

        let count: i64 = connection.query_row(
            &format!("SELECT COUNT(id) FROM \"transaction\" {WHERE_CLAUSE}"),
            named_params! {
                ":search": params.search,
                ":start": params.start,
                ":end": params.end,
            },
            |row| row.get(0),
        )?;

        Ok(count.unsigned_abs())
    }
}
