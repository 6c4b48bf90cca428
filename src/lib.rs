pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod upstream;

pub use config::AppConfig;
pub use error::{AppError, FetchError};
pub use service::SalesReportService;
pub use upstream::{CollectionSource, ItemStoreClient};
