pub mod client;
pub mod fetcher;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod retry;

pub use client::{CollectionSource, ItemStoreClient};
pub use fetcher::{Fetcher, SourceData, SourceOutcome};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemorySource;
pub use retry::{retry_with_backoff, RetryExhausted, RetryPolicy};
