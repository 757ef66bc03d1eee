//! Contains the SQLite implementation of the [TransactionStore](crate::TransactionStore).

mod transaction;

pub use transaction::SQLiteTransactionStore;
