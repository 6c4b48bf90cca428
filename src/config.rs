use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::upstream::RetryPolicy;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub fetch: FetchConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Item store the collections are read from
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Retry policy for critical (invoices, returns) and optional (reference) sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub critical_max_attempts: u32,
    pub critical_backoff_ms: u64,
    pub optional_max_attempts: u32,
    pub optional_backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub top_n: usize,
    pub default_salesman_target: f64,
    /// Supplied by an external period comparison; reported as-is.
    pub growth_vs_previous: f64,
    pub collection_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            upstream: UpstreamConfig {
                base_url: "http://127.0.0.1:8055".to_string(),
                token: None,
                timeout_secs: 30,
            },
            fetch: FetchConfig {
                critical_max_attempts: 3,
                critical_backoff_ms: 2000,
                optional_max_attempts: 2,
                optional_backoff_ms: 500,
            },
            report: ReportConfig {
                top_n: 10,
                default_salesman_target: 650_000.0,
                growth_vs_previous: 0.0,
                collection_rate: 0.0,
            },
        }
    }
}

impl AppConfig {
    /// Defaults, then `config/sales-report.*` if present, then `SALES_REPORT_*` env vars
    pub fn load() -> Result<Self, ConfigError> {
        let d = Self::default();
        Config::builder()
            .set_default("server.host", d.server.host)?
            .set_default("server.port", i64::from(d.server.port))?
            .set_default("upstream.base_url", d.upstream.base_url)?
            .set_default("upstream.timeout_secs", d.upstream.timeout_secs as i64)?
            .set_default("fetch.critical_max_attempts", i64::from(d.fetch.critical_max_attempts))?
            .set_default("fetch.critical_backoff_ms", d.fetch.critical_backoff_ms as i64)?
            .set_default("fetch.optional_max_attempts", i64::from(d.fetch.optional_max_attempts))?
            .set_default("fetch.optional_backoff_ms", d.fetch.optional_backoff_ms as i64)?
            .set_default("report.top_n", d.report.top_n as i64)?
            .set_default("report.default_salesman_target", d.report.default_salesman_target)?
            .set_default("report.growth_vs_previous", d.report.growth_vs_previous)?
            .set_default("report.collection_rate", d.report.collection_rate)?
            .add_source(File::with_name("config/sales-report").required(false))
            .add_source(
                Environment::with_prefix("SALES_REPORT")
                    .prefix_separator("_")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }

    pub fn critical_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.fetch.critical_max_attempts,
            backoff: Duration::from_millis(self.fetch.critical_backoff_ms),
            attempt_timeout: self.attempt_timeout(),
        }
    }

    pub fn optional_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.fetch.optional_max_attempts,
            backoff: Duration::from_millis(self.fetch.optional_backoff_ms),
            attempt_timeout: self.attempt_timeout(),
        }
    }
}
