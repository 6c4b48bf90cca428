use crate::error::AppError;
use crate::models::{collections, RawRecord};
use crate::upstream::retry::{retry_with_backoff, RetryPolicy};
use crate::upstream::CollectionSource;

/// Result of reading an optional source
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Loaded(Vec<RawRecord>),
    /// Retries ran out; the source counts as empty
    Degraded { reason: String },
}

impl SourceOutcome {
    /// Rows to index; a degraded source reads as no rows
    pub fn records(&self) -> &[RawRecord] {
        match self {
            SourceOutcome::Loaded(records) => records,
            SourceOutcome::Degraded { .. } => &[],
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SourceOutcome::Degraded { .. })
    }
}

/// Everything one report request reads from the item store
#[derive(Debug, Clone)]
pub struct SourceData {
    pub invoices: Vec<RawRecord>,
    pub returns: Vec<RawRecord>,
    pub salesmen: SourceOutcome,
    pub divisions: SourceOutcome,
    pub customers: SourceOutcome,
    pub branches: SourceOutcome,
}

/// Fetch policies for the two source classes
#[derive(Debug, Clone)]
pub struct Fetcher {
    pub critical: RetryPolicy,
    pub optional: RetryPolicy,
}

impl Fetcher {
    pub fn new(critical: RetryPolicy, optional: RetryPolicy) -> Self {
        Self { critical, optional }
    }

    /// Source that must load; exhaustion fails the request
    pub async fn fetch_critical(
        &self,
        source: &dyn CollectionSource,
        collection: &str,
    ) -> Result<Vec<RawRecord>, AppError> {
        match retry_with_backoff(&self.critical, collection, |_| source.fetch_collection(collection)).await {
            Ok(records) => {
                tracing::info!("[{}] loaded {} records", collection, records.len());
                Ok(records)
            }
            Err(exhausted) => {
                tracing::error!(
                    "[{}] critical source failed after {} attempts: {}",
                    collection, exhausted.attempts, exhausted.last_error
                );
                Err(AppError::CriticalSource {
                    source_name: collection.to_string(),
                    attempts: exhausted.attempts,
                    last_error: exhausted.last_error,
                })
            }
        }
    }

    /// Source that may fail; exhaustion degrades to no rows
    pub async fn fetch_optional(&self, source: &dyn CollectionSource, collection: &str) -> SourceOutcome {
        match retry_with_backoff(&self.optional, collection, |_| source.fetch_collection(collection)).await {
            Ok(records) => {
                tracing::info!("[{}] loaded {} records", collection, records.len());
                SourceOutcome::Loaded(records)
            }
            Err(exhausted) => {
                tracing::warn!(
                    "[{}] optional source unavailable after {} attempts, continuing without it: {}",
                    collection, exhausted.attempts, exhausted.last_error
                );
                SourceOutcome::Degraded {
                    reason: exhausted.last_error.to_string(),
                }
            }
        }
    }

    /// Reads all six collections concurrently
    ///
    /// Every read runs to completion before the critical results are
    /// checked, so a failing source never cancels its siblings.
    pub async fn fetch_all(&self, source: &dyn CollectionSource) -> Result<SourceData, AppError> {
        let (invoices, returns, salesmen, divisions, customers, branches) = futures::join!(
            self.fetch_critical(source, collections::INVOICES),
            self.fetch_critical(source, collections::RETURNS),
            self.fetch_optional(source, collections::SALESMEN),
            self.fetch_optional(source, collections::DIVISIONS),
            self.fetch_optional(source, collections::CUSTOMERS),
            self.fetch_optional(source, collections::BRANCHES),
        );

        Ok(SourceData {
            invoices: invoices?,
            returns: returns?,
            salesmen,
            divisions,
            customers,
            branches,
        })
    }
}
