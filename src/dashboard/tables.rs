//! The transaction table and its pagination controls.

use maud::{Markup, html};

use crate::{
    dashboard::state::ViewState,
    endpoints,
    html::{LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    query::TransactionPage,
    transaction::Transaction,
};

/// The ID of the element the search box swaps the table into.
pub(super) const TABLE_ID: &str = "transactions-table";

const PAGINATION_BUTTON_STYLE: &str = "px-3 py-2 rounded border border-gray-300 \
    dark:border-gray-600 bg-white dark:bg-gray-800";
const PAGINATION_DISABLED_STYLE: &str = "px-3 py-2 rounded border border-gray-200 \
    dark:border-gray-700 text-gray-400 dark:text-gray-600 cursor-not-allowed";

/// Renders `page` as a table followed by links to the previous and next pages of `state`.
pub(super) fn transactions_table_view(
    page: &TransactionPage,
    state: &ViewState,
    per_page: u64,
) -> Markup {
    html! {
        div id=(TABLE_ID) class="w-full" {
            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Image" }
                        }
                    }

                    tbody {
                        @for transaction in &page.transactions {
                            (transaction_row(transaction))
                        }

                        @if page.transactions.is_empty() {
                            tr class=(TABLE_ROW_STYLE) {
                                td colspan="7" class={(TABLE_CELL_STYLE) " text-center"} {
                                    "No transactions found."
                                }
                            }
                        }
                    }
                }
            }

            (pagination_view(state, page.total, per_page))
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id) {
            td class=(TABLE_CELL_STYLE) { (transaction.id) }
            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} {
                (transaction.title)
            }
            td class=(TABLE_CELL_STYLE) {
                (transaction.description.as_deref().unwrap_or_default())
            }
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} {
                (format_currency(transaction.price))
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) {
                @if transaction.sold { "Yes" } @else { "No" }
            }
            td class=(TABLE_CELL_STYLE) {
                @if let Some(image) = &transaction.image {
                    img src=(image) alt=(transaction.title) class="w-12 h-12 object-contain";
                }
            }
        }
    }
}

fn pagination_view(state: &ViewState, total: u64, per_page: u64) -> Markup {
    let previous_url = format!(
        "{}?{}",
        endpoints::DASHBOARD_VIEW,
        state.previous_page().to_query_string()
    );
    let next_url = format!(
        "{}?{}",
        endpoints::DASHBOARD_VIEW,
        state.next_page().to_query_string()
    );

    html! {
        nav class="flex items-center justify-between mt-4" aria-label="Table navigation" {
            span class="text-sm" {
                "Page " span id="page-number" { (state.page) }
                " | " (total) " transactions"
            }

            div class="flex gap-2" {
                @if state.page > 1 {
                    a id="previous-page" href=(previous_url) class=(PAGINATION_BUTTON_STYLE) {
                        span class=(LINK_STYLE) { "Previous" }
                    }
                } @else {
                    span class=(PAGINATION_DISABLED_STYLE) { "Previous" }
                }

                a id="next-page" href=(next_url) class=(PAGINATION_BUTTON_STYLE) {
                    span class=(LINK_STYLE) { "Next" }
                }
            }

            span class="text-sm" {
                "Per page: " (per_page)
            }
        }
    }
}
