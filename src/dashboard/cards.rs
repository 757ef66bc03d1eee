//! Tiles showing the sale totals of the selected month.

use maud::{Markup, html};

use crate::{html::format_currency, month::MonthRange, query::SaleStatistics};

const TILE_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col justify-between";

/// Renders the total sale amount, sold and not sold counts for `month`.
pub(super) fn statistics_tiles_view(month: &MonthRange, statistics: &SaleStatistics) -> Markup {
    html! {
        section id="statistics" class="w-full mx-auto mb-8" {
            div class="flex justify-between items-baseline mb-4" {
                h3 class="text-xl font-semibold" {
                    "Statistics"
                }
                span class="text-sm text-gray-600 dark:text-gray-400" {
                    (month.month.to_string()) " " (month.year)
                }
            }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (tile("total-sale-amount", "Total sale", &format_currency(statistics.total_sale_amount)))
                (tile("total-items-sold", "Total sold items", &statistics.total_items_sold.to_string()))
                (tile("total-items-not-sold", "Total not sold items", &statistics.total_items_not_sold.to_string()))
            }
        }
    }
}

fn tile(id: &str, label: &str, value: &str) -> Markup {
    html! {
        div id=(id) class=(TILE_STYLE) aria-label=(format!("{label}: {value}")) {
            h4 class="text-sm text-gray-600 dark:text-gray-400 mb-2" {
                (label)
            }
            div class="text-3xl font-bold" data-value {
                (value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::Month;

    use crate::{month::MonthRange, query::SaleStatistics, timezone::get_timezone};

    use super::statistics_tiles_view;

    fn tile_value(html: &Html, id: &str) -> String {
        let selector = Selector::parse(&format!("#{id} [data-value]")).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("could not find tile #{id}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[test]
    fn shows_each_statistic() {
        let month = MonthRange::new(2022, Month::March, get_timezone("Etc/UTC").unwrap()).unwrap();
        let statistics = SaleStatistics {
            total_sale_amount: 200.5,
            total_items_sold: 2,
            total_items_not_sold: 1,
        };

        let html = Html::parse_fragment(&statistics_tiles_view(&month, &statistics).into_string());

        assert_eq!(tile_value(&html, "total-sale-amount"), "$200.50");
        assert_eq!(tile_value(&html, "total-items-sold"), "2");
        assert_eq!(tile_value(&html, "total-items-not-sold"), "1");
    }
}
