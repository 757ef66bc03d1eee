//! Dashboard module
//!
//! Provides a page showing a month's sale statistics, a price-range chart and
//! a searchable, paginated table of transactions.

mod cards;
mod charts;
mod handlers;
mod state;
mod tables;

pub use handlers::{get_dashboard_page, get_transactions_table};
