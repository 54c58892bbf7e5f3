//! The monthly reports shown on the dashboard: sales statistics, a price
//! histogram for the bar chart and a category breakdown for the pie chart.

mod aggregation;
mod handlers;

pub use aggregation::{
    PriceRangeCount, SalesStatistics, get_category_distribution, get_price_histogram,
    get_sales_statistics,
};
pub use handlers::{DashboardState, get_bar_chart, get_pie_chart, get_statistics};
