use crate::error::AppError;
use crate::models::{DashboardResponse, RawRecord, ReportFilter, ReportQuery};
use crate::service::SalesReportService;
use axum::{
    extract::{rejection::QueryRejection, Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

/// Invoice pass-through body: `{ data: [...] }`
#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub data: Vec<RawRecord>,
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Executive sales dashboard
pub async fn sales_executive(
    State(service): State<Arc<SalesReportService>>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<DashboardResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::InvalidFilter {
        field: "query",
        reason: rejection.body_text(),
    })?;
    tracing::info!(
        "executive report requested: from={:?} to={:?} division={:?} branch={:?}",
        query.from_date, query.to_date, query.division, query.branch
    );
    let filter = ReportFilter::try_from(query)?;
    let response = service.executive_report(filter).await?;
    Ok(Json(response))
}

/// Raw sales invoices from the item store
pub async fn list_invoices(State(service): State<Arc<SalesReportService>>) -> Response {
    match service.raw_invoices().await {
        Ok(data) => (StatusCode::OK, Json(InvoiceListResponse { data })).into_response(),
        Err(e) => e.into_response(),
    }
}
