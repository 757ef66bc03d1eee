//! The paginated, searchable transaction listing.

use serde::Serialize;

use crate::{
    Error,
    pagination::PageRequest,
    stores::{TransactionQuery, TransactionStore},
    transaction::Transaction,
};

/// One page of transactions and the total number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPage {
    /// The transactions on the requested page, in insertion order.
    pub transactions: Vec<Transaction>,
    /// The number of transactions matching the search on every page.
    pub total: u64,
}

/// Get the transactions on `page` that match `search`.
///
/// An empty `search` matches every transaction.
///
/// # Errors
/// Returns an error if the store cannot be queried.
pub fn list_transactions(
    store: &impl TransactionStore,
    search: &str,
    page: PageRequest,
) -> Result<TransactionPage, Error> {
    let query = TransactionQuery::default().search(search);

    let transactions = store.get_query(&query.clone().page(page.offset(), page.per_page))?;
    let total = store.count(&query)?;

    Ok(TransactionPage {
        transactions,
        total,
    })
}
