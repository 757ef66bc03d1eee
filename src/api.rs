//! The JSON endpoints for listing transactions and their monthly statistics.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    app_state::QueryState,
    month::{MonthRange, resolve_month_range},
    pagination::PageRequest,
    query::{
        CategoryCount, CombinedStatistics, PriceRangeCount, SaleStatistics, TransactionPage,
        category_breakdown, combined_statistics, list_transactions, price_range_histogram,
        sale_statistics, transactions_in_month,
    },
    stores::TransactionStore,
    timezone::get_timezone,
    transaction::Transaction,
};

/// The query parameters for the transaction listing.
///
/// Numbers are taken as text so that malformed values are reported the same
/// way as every other error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Accepted for symmetry with the dashboard, the listing is not month-scoped.
    pub month: Option<String>,
    /// The 1-based page number.
    pub page: Option<String>,
    /// The number of transactions per page.
    pub per_page: Option<String>,
    /// Only include transactions containing this text.
    pub search: Option<String>,
}

/// The query parameters for month-scoped statistics.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// A month number or English month name.
    pub month: Option<String>,
    /// The year, defaults to the current year.
    pub year: Option<String>,
}

/// Get a page of transactions, optionally filtered by a search term.
pub async fn get_transactions<T>(
    State(state): State<QueryState<T>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TransactionPage>, Error>
where
    T: TransactionStore,
{
    let page = PageRequest::parse(
        query.page.as_deref(),
        query.per_page.as_deref(),
        &state.pagination_config,
    )?;

    let transactions = list_transactions(
        &state.transaction_store,
        query.search.as_deref().unwrap_or_default(),
        page,
    )?;

    Ok(Json(transactions))
}

/// Get the total sale amount and item counts for a month.
pub async fn get_statistics<T>(
    State(state): State<QueryState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SaleStatistics>, Error>
where
    T: TransactionStore,
{
    let transactions = get_month_transactions(&state, &query)?;

    Ok(Json(sale_statistics(&transactions)))
}

/// Get the number of transactions per price range for a month.
pub async fn get_price_range<T>(
    State(state): State<QueryState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, Error>
where
    T: TransactionStore,
{
    let transactions = get_month_transactions(&state, &query)?;

    Ok(Json(price_range_histogram(&transactions)))
}

/// Get the number of transactions per category for a month.
pub async fn get_category_stats<T>(
    State(state): State<QueryState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error>
where
    T: TransactionStore,
{
    let transactions = get_month_transactions(&state, &query)?;

    Ok(Json(category_breakdown(&transactions)))
}

/// Get the statistics, price ranges and category counts for a month in one response.
pub async fn get_combined_stats<T>(
    State(state): State<QueryState<T>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedStatistics>, Error>
where
    T: TransactionStore,
{
    let transactions = get_month_transactions(&state, &query)?;

    Ok(Json(combined_statistics(&transactions)))
}

/// Resolve the month in `query` in the server's timezone.
pub(crate) fn month_range<T>(
    state: &QueryState<T>,
    month: Option<&str>,
    year: Option<&str>,
) -> Result<MonthRange, Error>
where
    T: TransactionStore,
{
    let timezone = get_timezone(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    resolve_month_range(month, year, timezone)
}

fn get_month_transactions<T>(
    state: &QueryState<T>,
    query: &MonthQuery,
) -> Result<Vec<Transaction>, Error>
where
    T: TransactionStore,
{
    let month = month_range(state, query.month.as_deref(), query.year.as_deref())?;

    transactions_in_month(&state.transaction_store, &month)
        .inspect_err(|error| tracing::error!("could not get transactions for {month:?}: {error}"))
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{
        AppState, endpoints,
        stores::TransactionStore,
        test_utils::{InMemoryTransactionStore, test_state},
        transaction::Transaction,
    };

    use super::{
        get_category_stats, get_combined_stats, get_price_range, get_statistics,
        get_transactions,
    };

    fn get_test_server() -> TestServer {
        let state = test_state("http://localhost/unused.json");
        seed(&state);

        let app = Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                get(get_transactions::<InMemoryTransactionStore>),
            )
            .route(
                endpoints::STATISTICS_API,
                get(get_statistics::<InMemoryTransactionStore>),
            )
            .route(
                endpoints::PRICE_RANGE_API,
                get(get_price_range::<InMemoryTransactionStore>),
            )
            .route(
                endpoints::CATEGORY_STATS_API,
                get(get_category_stats::<InMemoryTransactionStore>),
            )
            .route(
                endpoints::COMBINED_STATS_API,
                get(get_combined_stats::<InMemoryTransactionStore>),
            )
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn seed(state: &AppState<InMemoryTransactionStore>) {
        state
            .transaction_store
            .replace_all(vec![
                Transaction::build("Backpack", 50.0, datetime!(2022-03-02 09:00 UTC))
                    .category("bags"),
                Transaction::build("Shirt", 150.0, datetime!(2022-03-15 09:00 UTC))
                    .category("clothing")
                    .sold(false),
                Transaction::build("Jacket", 75.0, datetime!(2022-04-15 09:00 UTC))
                    .category("clothing"),
            ])
            .unwrap();
    }

    #[tokio::test]
    async fn lists_transactions_with_defaults() {
        let server = get_test_server();

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 3);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 3);
        assert_eq!(body["transactions"][0]["title"], "Backpack");
    }

    #[tokio::test]
    async fn lists_searched_page() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("month", "3")
            .add_query_param("page", "2")
            .add_query_param("perPage", "1")
            .add_query_param("search", "a")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 2);
        assert_eq!(body["transactions"][0]["title"], "Jacket");
    }

    #[tokio::test]
    async fn non_numeric_page_is_a_server_error_with_message() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("page", "first")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "\"first\" is not a valid page number, pages start at 1"
        );
    }

    #[tokio::test]
    async fn statistics_for_march() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_API)
            .add_query_param("month", "March")
            .add_query_param("year", "2022")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "totalSaleAmount": 200.0,
            "totalItemsSold": 2,
            "totalItemsNotSold": 1
        }));
    }

    #[tokio::test]
    async fn statistics_for_empty_month_are_zero() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_API)
            .add_query_param("month", "7")
            .add_query_param("year", "2022")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "totalSaleAmount": 0.0,
            "totalItemsSold": 0,
            "totalItemsNotSold": 0
        }));
    }

    #[tokio::test]
    async fn invalid_month_is_a_server_error() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_API)
            .add_query_param("month", "Smarch")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "message": "\"Smarch\" is not a valid month" }));
    }

    #[tokio::test]
    async fn december_of_last_representable_year_is_a_server_error() {
        let server = get_test_server();

        let response = server
            .get(endpoints::STATISTICS_API)
            .add_query_param("month", "12")
            .add_query_param("year", "2147483647")
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn price_range_for_march() {
        let server = get_test_server();

        let response = server
            .get(endpoints::PRICE_RANGE_API)
            .add_query_param("month", "3")
            .add_query_param("year", "2022")
            .await;

        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), 10);
        assert_eq!(body[0], json!({ "range": "0-100", "count": 1 }));
        assert_eq!(body[1], json!({ "range": "101-200", "count": 1 }));
        assert_eq!(body[9], json!({ "range": "901-above", "count": 0 }));
    }

    #[tokio::test]
    async fn category_stats_for_march() {
        let server = get_test_server();

        let response = server
            .get(endpoints::CATEGORY_STATS_API)
            .add_query_param("month", "3")
            .add_query_param("year", "2022")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([
            { "_id": "bags", "count": 1 },
            { "_id": "clothing", "count": 1 }
        ]));
    }

    #[tokio::test]
    async fn combined_stats_has_all_three_results() {
        let server = get_test_server();

        let response = server
            .get(endpoints::COMBINED_STATS_API)
            .add_query_param("month", "4")
            .add_query_param("year", "2022")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["statistics"]["totalItemsSold"], 1);
        assert_eq!(body["priceRange"][0]["count"], 1);
        assert_eq!(body["categoryStats"], json!([{ "_id": "clothing", "count": 1 }]));
    }
}
