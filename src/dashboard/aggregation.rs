//! Summarises a month of transactions for the dashboard charts.
//!
//! Provides the sales statistics, a histogram of prices and the number of
//! transactions per category. No search filter applies to any of these.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    stores::{CategoryCount, TransactionStore},
    transaction::{PriceRange, TransactionFilter},
};

/// Sales totals for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatistics {
    /// The sum of the price of every transaction in the month, sold or not.
    pub total_sale_amount: f64,
    /// The number of transactions in the month that sold.
    pub total_sold_items: u64,
    /// The number of transactions in the month that did not sell.
    pub total_not_sold_items: u64,
}

/// A bar in the price histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "101-200" or "901-above".
    pub range: String,
    /// The number of transactions with a price in the bucket.
    pub count: u64,
}

/// A bucket of the price histogram, labelled with inclusive whole-number bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PriceBucket {
    /// The smallest price in the bucket.
    pub(crate) min: u32,
    /// The largest whole-number price in the bucket, `None` for no upper limit.
    pub(crate) max: Option<u32>,
}

/// The fixed histogram buckets, in display order.
pub(crate) const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket { min: 0, max: Some(100) },
    PriceBucket { min: 101, max: Some(200) },
    PriceBucket { min: 201, max: Some(300) },
    PriceBucket { min: 301, max: Some(400) },
    PriceBucket { min: 401, max: Some(500) },
    PriceBucket { min: 501, max: Some(600) },
    PriceBucket { min: 601, max: Some(700) },
    PriceBucket { min: 701, max: Some(800) },
    PriceBucket { min: 801, max: Some(900) },
    PriceBucket { min: 901, max: None },
];

impl PriceBucket {
    /// The label shown on the chart, e.g. "0-100" or "901-above".
    pub(crate) fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{}-{}", self.min, max),
            None => format!("{}-above", self.min),
        }
    }

    /// The prices in this bucket.
    ///
    /// Each bucket runs up to the start of the next one, so fractional prices
    /// such as 100.5 are counted in the lower bucket ("0-100") and no price
    /// falls between buckets.
    pub(crate) fn price_range(&self) -> PriceRange {
        PriceRange {
            min: f64::from(self.min),
            max: self.max.map(|max| f64::from(max) + 1.0),
        }
    }
}

/// Total up the sales in `month`.
///
/// A month with no transactions gives zero for every field.
///
/// # Errors
/// Returns any error from `store` unchanged.
pub fn get_sales_statistics(
    store: &impl TransactionStore,
    month: Month,
) -> Result<SalesStatistics, Error> {
    let filter = TransactionFilter::for_month(month);

    Ok(SalesStatistics {
        total_sale_amount: store.sum_price(&filter)?,
        total_sold_items: store.count(&filter.clone().with_sold(true))?,
        total_not_sold_items: store.count(&filter.with_sold(false))?,
    })
}

/// Count the transactions in `month` for each of the [PRICE_BUCKETS].
///
/// Every bucket is included, even if its count is zero.
///
/// # Errors
/// Returns any error from `store` unchanged.
pub fn get_price_histogram(
    store: &impl TransactionStore,
    month: Month,
) -> Result<Vec<PriceRangeCount>, Error> {
    PRICE_BUCKETS
        .iter()
        .map(|bucket| {
            let filter = TransactionFilter::for_month(month).with_price_range(bucket.price_range());

            Ok(PriceRangeCount {
                range: bucket.label(),
                count: store.count(&filter)?,
            })
        })
        .collect()
}

/// Count the transactions in `month` for each category.
///
/// Only categories with at least one transaction in the month are included.
///
/// # Errors
/// Returns any error from `store` unchanged.
pub fn get_category_distribution(
    store: &impl TransactionStore,
    month: Month,
) -> Result<Vec<CategoryCount>, Error> {
    store.count_by_category(&TransactionFilter::for_month(month))
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{Arc, Mutex},
    };

    use rusqlite::Connection;
    use time::{Month, macros::datetime};

    use crate::{
        Error,
        db::initialize,
        stores::{CategoryCount, SQLiteTransactionStore, TransactionStore},
        transaction::{Transaction, TransactionFilter},
    };

    use super::{
        PRICE_BUCKETS, get_category_distribution, get_price_histogram, get_sales_statistics,
    };

    fn get_test_store() -> SQLiteTransactionStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
    }

    /// A mix of prices, categories and sold flags across March and April.
    fn get_populated_store() -> SQLiteTransactionStore {
        let store = get_test_store();
        let prices = [
            0.0, 12.5, 100.0, 100.5, 101.0, 199.99, 200.0, 250.0, 300.5, 450.0, 599.0, 650.0,
            799.99, 800.0, 850.0, 900.0, 901.0, 9999.0,
        ];
        let categories = ["electronics", "jewelery", "men's clothing"];

        let mut transactions = Vec::new();
        for (i, price) in prices.iter().enumerate() {
            let id = i as i64 + 1;
            let date_of_sale = if i % 4 == 0 {
                datetime!(2022-04-10 12:00 UTC)
            } else {
                datetime!(2022-03-10 12:00 UTC)
            };

            transactions.push(
                Transaction::build(id, *price, date_of_sale)
                    .category(categories[i % categories.len()])
                    .sold(i % 3 == 0)
                    .finalise(),
            );
        }

        store.replace_all(&transactions).unwrap();
        store
    }

    fn month_count(store: &SQLiteTransactionStore, month: Month) -> u64 {
        store.count(&TransactionFilter::for_month(month)).unwrap()
    }

    #[test]
    fn bucket_labels() {
        let labels: Vec<_> = PRICE_BUCKETS.iter().map(|bucket| bucket.label()).collect();

        assert_eq!(
            labels,
            vec![
                "0-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700",
                "701-800", "801-900", "901-above"
            ]
        );
    }

    #[test]
    fn buckets_are_contiguous() {
        for pair in PRICE_BUCKETS.windows(2) {
            let lower = pair[0].price_range();
            let upper = pair[1].price_range();
            assert_eq!(lower.max, Some(upper.min), "gap between {pair:?}");
        }

        assert_eq!(PRICE_BUCKETS[0].price_range().min, 0.0);
        assert_eq!(PRICE_BUCKETS[9].price_range().max, None);
    }

    #[test]
    fn statistics_add_up_to_month_total() {
        let store = get_populated_store();

        for month in [Month::March, Month::April] {
            let statistics = get_sales_statistics(&store, month).unwrap();

            assert_eq!(
                statistics.total_sold_items + statistics.total_not_sold_items,
                month_count(&store, month)
            );
            assert_eq!(
                statistics.total_sale_amount,
                store
                    .sum_price(&TransactionFilter::for_month(month))
                    .unwrap()
            );
        }
    }

    #[test]
    fn statistics_sum_every_price_sold_or_not() {
        let store = get_test_store();
        store
            .replace_all(&[
                Transaction::build(1, 150.0, datetime!(2022-03-01 00:00 UTC))
                    .sold(true)
                    .finalise(),
                Transaction::build(2, 50.0, datetime!(2022-03-02 00:00 UTC))
                    .sold(false)
                    .finalise(),
                Transaction::build(3, 75.0, datetime!(2022-03-03 00:00 UTC))
                    .sold(false)
                    .finalise(),
            ])
            .unwrap();

        let statistics = get_sales_statistics(&store, Month::March).unwrap();

        assert_eq!(statistics.total_sale_amount, 275.0);
        assert_eq!(statistics.total_sold_items, 1);
        assert_eq!(statistics.total_not_sold_items, 2);
    }

    #[test]
    fn histogram_counts_add_up_to_month_total() {
        let store = get_populated_store();

        for month in [Month::March, Month::April] {
            let histogram = get_price_histogram(&store, month).unwrap();

            assert_eq!(histogram.len(), PRICE_BUCKETS.len());
            let total: u64 = histogram.iter().map(|bar| bar.count).sum();
            assert_eq!(total, month_count(&store, month), "for {month}");
        }
    }

    #[test]
    fn histogram_puts_boundary_prices_in_labelled_bucket() {
        let store = get_test_store();
        store
            .replace_all(&[
                Transaction::build(1, 100.0, datetime!(2022-03-01 00:00 UTC)).finalise(),
                Transaction::build(2, 100.5, datetime!(2022-03-01 00:00 UTC)).finalise(),
                Transaction::build(3, 200.0, datetime!(2022-03-01 00:00 UTC)).finalise(),
                Transaction::build(4, 901.0, datetime!(2022-03-01 00:00 UTC)).finalise(),
                Transaction::build(5, 1_000_000.0, datetime!(2022-03-01 00:00 UTC)).finalise(),
            ])
            .unwrap();

        let histogram = get_price_histogram(&store, Month::March).unwrap();
        let counts: Vec<_> = histogram.iter().map(|bar| bar.count).collect();

        assert_eq!(counts, vec![2, 1, 0, 0, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn category_counts_add_up_to_month_total_without_duplicates() {
        let store = get_populated_store();

        for month in [Month::March, Month::April] {
            let distribution = get_category_distribution(&store, month).unwrap();

            let total: u64 = distribution.iter().map(|entry| entry.count).sum();
            assert_eq!(total, month_count(&store, month));

            let unique: HashSet<_> = distribution.iter().map(|entry| &entry.category).collect();
            assert_eq!(unique.len(), distribution.len());
            assert!(distribution.iter().all(|entry| entry.count > 0));
        }
    }

    #[test]
    fn march_sale_shows_up_in_every_report() {
        let store = get_test_store();
        store
            .replace_all(&[Transaction::build(1, 150.0, datetime!(2022-03-20 09:30 UTC))
                .category("Electronics")
                .sold(true)
                .finalise()])
            .unwrap();

        let statistics = get_sales_statistics(&store, Month::March).unwrap();
        assert_eq!(statistics.total_sale_amount, 150.0);
        assert_eq!(statistics.total_sold_items, 1);

        let histogram = get_price_histogram(&store, Month::March).unwrap();
        let bar = histogram.iter().find(|bar| bar.range == "101-200").unwrap();
        assert_eq!(bar.count, 1);

        let distribution = get_category_distribution(&store, Month::March).unwrap();
        assert_eq!(
            distribution,
            vec![CategoryCount {
                category: "Electronics".to_owned(),
                count: 1
            }]
        );
    }

    #[test]
    fn empty_store_gives_zeros_and_no_categories() {
        let store = get_test_store();

        let statistics = get_sales_statistics(&store, Month::March).unwrap();
        assert_eq!(statistics.total_sale_amount, 0.0);
        assert_eq!(statistics.total_sold_items, 0);
        assert_eq!(statistics.total_not_sold_items, 0);

        let histogram = get_price_histogram(&store, Month::March).unwrap();
        assert_eq!(histogram.len(), 10);
        assert!(histogram.iter().all(|bar| bar.count == 0));

        let distribution = get_category_distribution(&store, Month::March).unwrap();
        assert!(distribution.is_empty());
    }

    #[test]
    fn store_errors_are_returned_without_partial_results() {
        let conn = Connection::open_in_memory().unwrap();
        // No tables, so every query fails.
        let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));

        assert!(matches!(
            get_sales_statistics(&store, Month::March),
            Err(Error::SqlError(_))
        ));
        assert!(matches!(
            get_price_histogram(&store, Month::March),
            Err(Error::SqlError(_))
        ));
        assert!(matches!(
            get_category_distribution(&store, Month::March),
            Err(Error::SqlError(_))
        ));
    }
}
