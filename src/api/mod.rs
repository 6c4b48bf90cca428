pub mod handlers;

pub use handlers::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::service::SalesReportService;

/// All routes over one shared report service
pub fn router(service: Arc<SalesReportService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/sales/executive", get(sales_executive))
        .route("/api/invoice", get(list_invoices))
        .with_state(service)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
