//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the monthly statistics, chart and transaction table.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The transaction table fragment the dashboard requests when searching or paging.
pub const DASHBOARD_TRANSACTIONS: &str = "/dashboard/transactions";

/// The route to replace the stored transactions with the seed document.
pub const INIT_API: &str = "/api/init";
/// The route to list transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for the sale totals of a month.
pub const STATISTICS_API: &str = "/api/statistics";
/// The route for the price-range histogram of a month.
pub const PRICE_RANGE_API: &str = "/api/price-range";
/// The route for the category breakdown of a month.
pub const CATEGORY_STATS_API: &str = "/api/category-stats";
/// The route for all three monthly aggregates at once.
pub const COMBINED_STATS_API: &str = "/api/combined-stats";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_TRANSACTIONS);

        assert_endpoint_is_valid_uri(endpoints::INIT_API);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS_API);
        assert_endpoint_is_valid_uri(endpoints::PRICE_RANGE_API);
        assert_endpoint_is_valid_uri(endpoints::CATEGORY_STATS_API);
        assert_endpoint_is_valid_uri(endpoints::COMBINED_STATS_API);
    }
}
