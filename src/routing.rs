//! Application router configuration.

use axum::{Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, Error,
    dashboard::{get_bar_chart, get_pie_chart, get_statistics},
    endpoints,
    seed::initialize_database,
    transaction::get_transactions,
};

/// Return a router with all the app's routes.
///
/// Any origin may call the API so that the dashboard frontend can be served
/// from a different host.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route(endpoints::INITIALIZE, get(initialize_database))
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::STATISTICS, get(get_statistics))
        .route(endpoints::BAR_CHART, get(get_bar_chart))
        .route(endpoints::PIE_CHART, get(get_pie_chart))
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .layer(cors)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

async fn get_405_method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
