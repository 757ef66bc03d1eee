//! Monthly sale statistics, price-range histogram and category breakdown.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    Error,
    month::MonthRange,
    stores::{TransactionQuery, TransactionStore},
    transaction::Transaction,
};

/// Totals for the transactions in a month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The sum of the prices of every transaction in the month.
    pub total_sale_amount: f64,
    /// The number of transactions in the month.
    pub total_items_sold: u64,
    /// The number of transactions in the month that were not sold.
    pub total_items_not_sold: u64,
}

/// A price sub-range used for histogram counting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// The label clients display for the bucket.
    pub label: &'static str,
    /// The smallest price in the bucket (inclusive), negative infinity for the first bucket.
    pub min: f64,
    /// The price where the next bucket starts (exclusive), `None` for the last bucket.
    pub max: Option<f64>,
}

impl PriceBucket {
    const fn new(label: &'static str, min: f64, max: Option<f64>) -> Self {
        Self { label, min, max }
    }

    /// Whether `price` falls in this bucket.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price < max)
    }
}

/// The histogram buckets, in order.
///
/// The buckets are contiguous and unbounded at both ends, so every price
/// falls in exactly one of them. Negative prices are counted in "0-100".
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket::new("0-100", f64::NEG_INFINITY, Some(100.0)),
    PriceBucket::new("101-200", 100.0, Some(200.0)),
    PriceBucket::new("201-300", 200.0, Some(300.0)),
    PriceBucket::new("301-400", 300.0, Some(400.0)),
    PriceBucket::new("401-500", 400.0, Some(500.0)),
    PriceBucket::new("501-600", 500.0, Some(600.0)),
    PriceBucket::new("601-700", 600.0, Some(700.0)),
    PriceBucket::new("701-800", 700.0, Some(800.0)),
    PriceBucket::new("801-900", 800.0, Some(900.0)),
    PriceBucket::new("901-above", 900.0, None),
];

/// The number of transactions in one price bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "101-200".
    pub range: &'static str,
    /// The number of transactions priced within the bucket.
    pub count: u64,
}

/// The number of transactions in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category name.
    #[serde(rename = "_id")]
    pub category: String,
    /// The number of transactions in the category.
    pub count: u64,
}

/// The three monthly aggregates together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedStatistics {
    /// See [sale_statistics].
    pub statistics: SaleStatistics,
    /// See [price_range_histogram].
    pub price_range: Vec<PriceRangeCount>,
    /// See [category_breakdown].
    pub category_stats: Vec<CategoryCount>,
}

/// Get every transaction sold within `month`.
///
/// # Errors
/// Returns an error if the store cannot be queried.
pub fn transactions_in_month(
    store: &impl TransactionStore,
    month: &MonthRange,
) -> Result<Vec<Transaction>, Error> {
    store.get_query(&TransactionQuery::default().date_range(month.as_range()))
}

/// Sum the prices and count the (unsold) items in `transactions`.
///
/// An empty slice gives all-zero statistics.
pub fn sale_statistics(transactions: &[Transaction]) -> SaleStatistics {
    transactions
        .iter()
        .fold(SaleStatistics::default(), |mut statistics, transaction| {
            statistics.total_sale_amount += transaction.price;
            statistics.total_items_sold += 1;
            if !transaction.sold {
                statistics.total_items_not_sold += 1;
            }
            statistics
        })
}

/// Count the transactions in each of the [PRICE_BUCKETS], in bucket order.
pub fn price_range_histogram(transactions: &[Transaction]) -> Vec<PriceRangeCount> {
    PRICE_BUCKETS
        .iter()
        .map(|bucket| PriceRangeCount {
            range: bucket.label,
            count: transactions
                .iter()
                .filter(|transaction| bucket.contains(transaction.price))
                .count() as u64,
        })
        .collect()
}

/// Count the transactions per category, ordered by category name.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();

    for transaction in transactions {
        *counts.entry(transaction.category.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect()
}

/// Compute all three monthly aggregates over `transactions`.
pub fn combined_statistics(transactions: &[Transaction]) -> CombinedStatistics {
    CombinedStatistics {
        statistics: sale_statistics(transactions),
        price_range: price_range_histogram(transactions),
        category_stats: category_breakdown(transactions),
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::{
        month::MonthRange,
        stores::TransactionStore,
        test_utils::InMemoryTransactionStore,
        timezone::get_timezone,
        transaction::{NewTransaction, Transaction},
    };

    use super::{
        PRICE_BUCKETS, SaleStatistics, category_breakdown, combined_statistics,
        price_range_histogram, sale_statistics, transactions_in_month,
    };

    fn march() -> MonthRange {
        MonthRange::new(2022, Month::March, get_timezone("Etc/UTC").unwrap()).unwrap()
    }

    fn seeded_store(transactions: Vec<NewTransaction>) -> InMemoryTransactionStore {
        let store = InMemoryTransactionStore::default();
        store.replace_all(transactions).unwrap();
        store
    }

    fn mixed_month() -> Vec<NewTransaction> {
        vec![
            Transaction::build("Backpack", 329.85, datetime!(2022-03-02 09:00 UTC))
                .category("men's clothing"),
            Transaction::build("Ring", 9.99, datetime!(2022-03-15 09:00 UTC))
                .category("jewelery")
                .sold(false),
            Transaction::build("Monitor", 999.99, datetime!(2022-03-31 23:59 UTC))
                .category("electronics"),
            Transaction::build("Bracelet", 100.0, datetime!(2022-03-20 09:00 UTC))
                .category("jewelery")
                .sold(false),
            Transaction::build("Laptop", 1200.0, datetime!(2022-04-01 00:00 UTC))
                .category("electronics"),
            Transaction::build("Jacket", 56.99, datetime!(2021-03-10 00:00 UTC))
                .category("women's clothing"),
        ]
    }

    #[test]
    fn example_month_statistics_and_histogram() {
        let store = seeded_store(vec![
            Transaction::build("A", 50.0, datetime!(2022-03-05 12:00 UTC)),
            Transaction::build("B", 150.0, datetime!(2022-03-06 12:00 UTC)).sold(false),
        ]);
        let transactions = transactions_in_month(&store, &march()).unwrap();

        let statistics = sale_statistics(&transactions);
        let histogram = price_range_histogram(&transactions);

        assert_eq!(
            statistics,
            SaleStatistics {
                total_sale_amount: 200.0,
                total_items_sold: 2,
                total_items_not_sold: 1,
            }
        );
        assert_eq!(histogram[0].range, "0-100");
        assert_eq!(histogram[0].count, 1);
        assert_eq!(histogram[1].range, "101-200");
        assert_eq!(histogram[1].count, 1);
        assert!(histogram[2..].iter().all(|bucket| bucket.count == 0));
    }

    #[test]
    fn only_transactions_in_the_month_are_included() {
        let store = seeded_store(mixed_month());

        let transactions = transactions_in_month(&store, &march()).unwrap();

        let titles: Vec<_> = transactions.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Backpack", "Ring", "Monitor", "Bracelet"]);
    }

    #[test]
    fn empty_month_has_zero_statistics() {
        let statistics = sale_statistics(&[]);

        assert_eq!(statistics, SaleStatistics::default());
        assert_eq!(statistics.total_sale_amount, 0.0);
    }

    #[test]
    fn histogram_has_every_bucket_in_order() {
        let histogram = price_range_histogram(&[]);

        let labels: Vec<_> = histogram.iter().map(|bucket| bucket.range).collect();
        let want: Vec<_> = PRICE_BUCKETS.iter().map(|bucket| bucket.label).collect();
        assert_eq!(labels, want);
        assert_eq!(labels.last(), Some(&"901-above"));
    }

    #[test]
    fn histogram_counts_sum_to_month_total() {
        let store = seeded_store(mixed_month());
        let transactions = transactions_in_month(&store, &march()).unwrap();

        let histogram = price_range_histogram(&transactions);

        let sum: u64 = histogram.iter().map(|bucket| bucket.count).sum();
        assert_eq!(sum, transactions.len() as u64);
        // 100.0 starts the second bucket and 999.99 lands in the open-ended one.
        assert_eq!(histogram[1].count, 1);
        assert_eq!(histogram[9].count, 1);
    }

    #[test]
    fn negative_price_is_counted_in_first_bucket() {
        let store = seeded_store(vec![
            Transaction::build("Refund", -5.0, datetime!(2022-03-10 10:00 UTC)),
            Transaction::build("Mug", 5.0, datetime!(2022-03-11 10:00 UTC)),
        ]);
        let transactions = transactions_in_month(&store, &march()).unwrap();

        let histogram = price_range_histogram(&transactions);

        assert_eq!(histogram[0].count, 2);
        let sum: u64 = histogram.iter().map(|bucket| bucket.count).sum();
        assert_eq!(sum, 2);
    }

    #[test]
    fn category_counts_sum_to_month_total() {
        let store = seeded_store(mixed_month());
        let transactions = transactions_in_month(&store, &march()).unwrap();

        let categories = category_breakdown(&transactions);

        let sum: u64 = categories.iter().map(|category| category.count).sum();
        assert_eq!(sum, transactions.len() as u64);
        let names: Vec<_> = categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["electronics", "jewelery", "men's clothing"]);
        assert_eq!(categories[1].count, 2);
    }

    #[test]
    fn combined_matches_individual_aggregates() {
        let store = seeded_store(mixed_month());
        let transactions = transactions_in_month(&store, &march()).unwrap();

        let combined = combined_statistics(&transactions);

        assert_eq!(combined.statistics, sale_statistics(&transactions));
        assert_eq!(combined.price_range, price_range_histogram(&transactions));
        assert_eq!(combined.category_stats, category_breakdown(&transactions));
    }

    #[test]
    fn category_count_serialises_with_id_key() {
        let categories = category_breakdown(&[Transaction {
            id: 1,
            title: "Ring".to_owned(),
            description: None,
            price: 9.99,
            date_of_sale: datetime!(2022-03-15 09:00 UTC),
            sold: true,
            category: "jewelery".to_owned(),
            image: None,
        }]);

        let value = serde_json::to_value(&categories).unwrap();

        assert_eq!(value, serde_json::json!([{ "_id": "jewelery", "count": 1 }]));
    }
}
