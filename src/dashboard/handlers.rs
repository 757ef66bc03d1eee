//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard page and the transaction table fragment
//! - The render-refresh function that builds the views for a [ViewState]
//! - HTML view functions for the page layout and controls

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use time::Month;

use crate::{
    Error,
    api::month_range,
    app_state::QueryState,
    dashboard::{
        cards::statistics_tiles_view,
        charts::{DashboardChart, chart_view, charts_script, price_range_chart},
        state::{DashboardQuery, Refresh, ViewState},
        tables::{TABLE_ID, transactions_table_view},
    },
    endpoints,
    html::{
        ECHARTS_SCRIPT_URL, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, base, error_view,
    },
    pagination::PageRequest,
    query::{list_transactions, price_range_histogram, sale_statistics, transactions_in_month},
    stores::TransactionStore,
};

/// The rendered parts of the dashboard.
///
/// The tiles and chart are `None` when only the table was refreshed.
struct DashboardViews {
    table: Markup,
    tiles: Option<Markup>,
    chart: Option<DashboardChart>,
}

/// Display the dashboard for the month, page and search text in the query.
pub async fn get_dashboard_page<T>(
    State(state): State<QueryState<T>>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    T: TransactionStore,
{
    let result = ViewState::from_query(&query).and_then(|view| {
        let views = render_refresh(&view, Refresh::All, &state)?;
        Ok(dashboard_view(&view, views))
    });

    match result {
        Ok(page) => page.into_response(),
        Err(error) => {
            tracing::error!("could not render the dashboard: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_view(
                    "Error",
                    "500",
                    "Sorry, something went wrong.",
                    &error.to_string(),
                ),
            )
                .into_response()
        }
    }
}

/// Display only the transaction table, for the dashboard's search box.
///
/// Requests that do not come from HTMX are redirected to the full dashboard page.
pub async fn get_transactions_table<T>(
    State(state): State<QueryState<T>>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    T: TransactionStore,
{
    let view = match ViewState::from_query(&query) {
        Ok(view) => view,
        Err(error) => return error.into_response(),
    };

    if !is_htmx_request {
        return Redirect::to(&dashboard_url(&view)).into_response();
    }

    match render_refresh(&view, Refresh::TableOnly, &state) {
        Ok(views) => views.table.into_response(),
        Err(error) => error.into_response(),
    }
}

/// Build the views of the dashboard that `scope` says must be refreshed for `view`.
///
/// The table lists every transaction matching the search text, the tiles and
/// chart summarise the selected month.
///
/// # Errors
/// Returns an error if the store cannot be queried or the month is invalid.
fn render_refresh<T>(
    view: &ViewState,
    scope: Refresh,
    state: &QueryState<T>,
) -> Result<DashboardViews, Error>
where
    T: TransactionStore,
{
    let page = PageRequest {
        page: view.page,
        per_page: state.pagination_config.default_page_size,
    };
    let listing = list_transactions(&state.transaction_store, &view.search, page)
        .inspect_err(|error| tracing::error!("could not get transactions for {view:?}: {error}"))?;
    let table = transactions_table_view(&listing, view, page.per_page);

    if scope == Refresh::TableOnly {
        return Ok(DashboardViews {
            table,
            tiles: None,
            chart: None,
        });
    }

    let year = view.year.map(|year| year.to_string());
    let month = month_range(state, Some(&view.month.to_string()), year.as_deref())?;
    let transactions = transactions_in_month(&state.transaction_store, &month)
        .inspect_err(|error| tracing::error!("could not get transactions for {month:?}: {error}"))?;

    Ok(DashboardViews {
        table,
        tiles: Some(statistics_tiles_view(&month, &sale_statistics(&transactions))),
        chart: Some(price_range_chart(
            &month,
            &price_range_histogram(&transactions),
        )),
    })
}

fn dashboard_url(view: &ViewState) -> String {
    format!("{}?{}", endpoints::DASHBOARD_VIEW, view.to_query_string())
}

fn month_select_view(view: &ViewState) -> Markup {
    let months = (1..=12).filter_map(|number| Month::try_from(number).ok());

    html! {
        div {
            label for="month-select" class=(FORM_LABEL_STYLE) { "Month" }

            select
                id="month-select"
                class=(FORM_TEXT_INPUT_STYLE)
                onchange="window.location.href = this.value"
            {
                @for month in months {
                    option
                        value=(dashboard_url(&view.with_month(month as u8)))
                        selected[month as u8 == view.month]
                    {
                        (month.to_string())
                    }
                }
            }
        }
    }
}

fn search_view(view: &ViewState) -> Markup {
    html! {
        form
            id="search-form"
            action=(endpoints::DASHBOARD_VIEW)
            method="get"
            class="grow"
        {
            input type="hidden" name="month" value=(view.month);
            @if let Some(year) = view.year {
                input type="hidden" name="year" value=(year);
            }
            input type="hidden" name="page" value=(view.page);

            label for="search" class=(FORM_LABEL_STYLE) { "Search transaction" }

            input
                id="search"
                type="search"
                name="search"
                value=(view.search)
                placeholder="Title, description or price"
                class=(FORM_TEXT_INPUT_STYLE)
                hx-get=(endpoints::DASHBOARD_TRANSACTIONS)
                hx-trigger="input changed"
                hx-target={"#" (TABLE_ID)}
                hx-swap="outerHTML"
                hx-include="closest form";
        }
    }
}

fn dashboard_view(view: &ViewState, views: DashboardViews) -> Markup {
    let content = html!(
        div
            id="dashboard-content"
            class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl gap-4"}
        {
            h1 class="text-3xl font-bold mb-4" { "Transaction Dashboard" }

            div class="flex flex-col sm:flex-row gap-4 w-full mb-4"
            {
                (search_view(view))
                (month_select_view(view))
            }

            @if let Some(tiles) = &views.tiles {
                (tiles)
            }

            @if let Some(chart) = &views.chart {
                (chart_view(chart))
            }

            (views.table)
        }
    );

    let mut scripts = vec![HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())];
    if let Some(chart) = &views.chart {
        scripts.push(charts_script(chart));
    }

    base("Dashboard", &scripts, &content)
}
