use bigdecimal::{BigDecimal, FromPrimitive, Zero};
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{collections, DashboardResponse, PeriodComparison, RawRecord, ReportFilter};
use crate::service::aggregate::{aggregate, AggregateOptions};
use crate::service::assemble::assemble;
use crate::service::index::ReferenceIndexes;
use crate::service::normalize::normalize_all;
use crate::service::returns::reconcile;
use crate::upstream::{CollectionSource, Fetcher, SourceData};

/// Sales report pipeline: fetch, join, aggregate, assemble
///
/// Holds no per-request state; every call rebuilds its indexes from a
/// fresh read of the item store.
pub struct SalesReportService {
    source: Arc<dyn CollectionSource>,
    fetcher: Fetcher,
    options: AggregateOptions,
    comparison: PeriodComparison,
}

impl SalesReportService {
    pub fn new(
        source: Arc<dyn CollectionSource>,
        fetcher: Fetcher,
        options: AggregateOptions,
        comparison: PeriodComparison,
    ) -> Self {
        Self {
            source,
            fetcher,
            options,
            comparison,
        }
    }

    pub fn from_config(config: &AppConfig, source: Arc<dyn CollectionSource>) -> Self {
        let options = AggregateOptions {
            top_n: config.report.top_n,
            default_target: BigDecimal::from_f64(config.report.default_salesman_target)
                .unwrap_or_else(BigDecimal::zero),
        };
        let comparison = PeriodComparison {
            growth_vs_previous: config.report.growth_vs_previous,
            collection_rate: config.report.collection_rate,
        };
        Self::new(
            source,
            Fetcher::new(config.critical_policy(), config.optional_policy()),
            options,
            comparison,
        )
    }

    /// Executive dashboard for `filter`
    pub async fn executive_report(&self, filter: ReportFilter) -> Result<DashboardResponse, AppError> {
        let started = Instant::now();

        // 1. read all six collections
        let data = self.fetcher.fetch_all(self.source.as_ref()).await?;
        let degraded: Vec<&str> = [
            (collections::SALESMEN, &data.salesmen),
            (collections::DIVISIONS, &data.divisions),
            (collections::CUSTOMERS, &data.customers),
            (collections::BRANCHES, &data.branches),
        ]
        .iter()
        .filter(|(_, outcome)| outcome.is_degraded())
        .map(|(name, _)| *name)
        .collect();
        if !degraded.is_empty() {
            tracing::warn!("building report without: {}", degraded.join(", "));
        }
        tracing::info!(
            "fetched {} invoices, {} returns in {:?}",
            data.invoices.len(),
            data.returns.len(),
            started.elapsed()
        );

        // 2-5. CPU-bound part off the async workers
        let options = self.options.clone();
        let comparison = self.comparison;
        let response = tokio::task::spawn_blocking(move || build_report(&data, &filter, &options, comparison))
            .await
            .map_err(|e| AppError::Internal(format!("report task failed: {}", e)))?;

        tracing::info!("executive report built in {:?}", started.elapsed());
        Ok(response)
    }

    /// Raw invoice rows, read with the critical policy
    pub async fn raw_invoices(&self) -> Result<Vec<RawRecord>, AppError> {
        self.fetcher
            .fetch_critical(self.source.as_ref(), collections::INVOICES)
            .await
    }
}

/// Index, reconcile, normalize, aggregate and assemble one request's data
pub fn build_report(
    data: &SourceData,
    filter: &ReportFilter,
    options: &AggregateOptions,
    comparison: PeriodComparison,
) -> DashboardResponse {
    // 2. reference indexes and return groups are independent
    let (indexes, returns) = rayon::join(|| ReferenceIndexes::build(data), || reconcile(&data.returns));
    tracing::debug!(
        "indexed {} salesmen, {} divisions, {} customers, {} branches; {} invoices with returns",
        indexes.salesmen.len(),
        indexes.divisions.len(),
        indexes.customers.len(),
        indexes.branches.len(),
        returns.len()
    );

    // 3. join
    let invoices = normalize_all(&data.invoices, &returns, &indexes);

    // 4. filter + views
    let view = aggregate(&invoices, filter, options);
    tracing::info!(
        "report: {} invoices after filter, {} divisions, {} customers ranked",
        view.summary.invoice_count,
        view.division_sales.len(),
        view.top_customers.len()
    );

    // 5. response shape
    assemble(&view, comparison)
}
