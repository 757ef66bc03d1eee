//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use crate::{
    AppState, MessageBody,
    api::{get_category_stats, get_combined_stats, get_price_range, get_statistics, get_transactions},
    dashboard::{get_dashboard_page, get_transactions_table},
    endpoints,
    seed::get_init,
    stores::TransactionStore,
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore,
{
    let api_routes = Router::new()
        .route(endpoints::INIT_API, get(get_init::<T>))
        .route(endpoints::TRANSACTIONS_API, get(get_transactions::<T>))
        .route(endpoints::STATISTICS_API, get(get_statistics::<T>))
        .route(endpoints::PRICE_RANGE_API, get(get_price_range::<T>))
        .route(endpoints::CATEGORY_STATS_API, get(get_category_stats::<T>))
        .route(endpoints::COMBINED_STATS_API, get(get_combined_stats::<T>));

    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page::<T>))
        .route(
            endpoints::DASHBOARD_TRANSACTIONS,
            get(get_transactions_table::<T>),
        );

    view_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(MessageBody {
            message: "not found".to_owned(),
        }),
    )
        .into_response()
}
