//! Defines the transaction store trait.

use std::ops::Range;

use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{NewTransaction, Transaction},
};

/// Handles the bulk replacement and retrieval of transactions.
///
/// Implementers must make [TransactionStore::replace_all] appear atomic to
/// concurrent readers: a query either sees the old set of transactions or the
/// new one, never a mix.
pub trait TransactionStore: Clone + Send + Sync + 'static {
    /// Discard every transaction in the store and insert `transactions`.
    ///
    /// Returns the number of inserted transactions.
    fn replace_all(&self, transactions: Vec<NewTransaction>) -> Result<usize, Error>;

    /// Retrieve transactions from the store in the way defined by `query`,
    /// in insertion order.
    fn get_query(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Count the transactions matching the filters of `query`.
    ///
    /// The `offset` and `limit` of `query` are ignored.
    fn count(&self, query: &TransactionQuery) -> Result<u64, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_query].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Include transactions whose title, description or price contains this
    /// text, ignoring ASCII case.
    pub search: Option<String>,
    /// Include transactions sold within `date_range` (start inclusive, end exclusive).
    pub date_range: Option<Range<OffsetDateTime>>,
    /// Skip this many matching transactions.
    pub offset: u64,
    /// Selects up to the first N (`limit`) transactions after `offset`.
    pub limit: Option<u64>,
}

impl TransactionQuery {
    /// Match every transaction containing `search`. An empty string matches everything.
    pub fn search(mut self, search: &str) -> Self {
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_owned())
        };
        self
    }

    /// Match transactions sold within `date_range`.
    pub fn date_range(mut self, date_range: Range<OffsetDateTime>) -> Self {
        self.date_range = Some(date_range);
        self
    }

    /// Return the `limit` transactions after skipping `offset` of them.
    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionQuery;

    #[test]
    fn empty_search_matches_everything() {
        let query = TransactionQuery::default().search("");

        assert_eq!(query.search, None);
    }

    #[test]
    fn search_keeps_text() {
        let query = TransactionQuery::default().search("Shirt");

        assert_eq!(query.search.as_deref(), Some("Shirt"));
    }
}
