//! The API endpoints URIs.
//!
//! Every report takes the month to report on as a query parameter,
//! e.g. `/api/statistics?month=March`.

/// The route for replacing the store contents with the seed dataset.
pub const INITIALIZE: &str = "/api/initialize";
/// The route for listing a month's transactions, with search and paging.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for a month's sales totals.
pub const STATISTICS: &str = "/api/statistics";
/// The route for a month's price histogram.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for a month's transaction count per category.
pub const PIE_CHART: &str = "/api/pie-chart";

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::INITIALIZE);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
    }
}
