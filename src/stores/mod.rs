//! Contains the trait and implementations for the store that holds [transactions](crate::Transaction).

mod transaction;

pub mod sqlite;

pub use transaction::{TransactionQuery, TransactionStore};
