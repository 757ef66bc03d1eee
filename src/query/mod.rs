//! The read-only operations over the transaction store.
//!
//! The month-scoped aggregates are pure functions over the transactions of a
//! month, so that the combined statistics and the individual endpoints share
//! the same computations.

mod listing;
mod statistics;

pub use listing::{TransactionPage, list_transactions};
pub use statistics::{
    CategoryCount, CombinedStatistics, PRICE_BUCKETS, PriceBucket, PriceRangeCount,
    SaleStatistics, category_breakdown, combined_statistics, price_range_histogram,
    sale_statistics, transactions_in_month,
};
