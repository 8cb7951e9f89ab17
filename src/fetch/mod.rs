//! Retrieval of raw collections from the job board API.
//!
//! The normalization engine never performs I/O itself; it consumes the three
//! collections a [`BoardFetcher`] has already materialized in memory.
//!
//! # Implementations
//! - [`greenhouse::GreenhouseClient`] — the public boards API over HTTP with
//!   exponential-backoff retry on transient failures.

pub mod greenhouse;

use serde_json::Value;

use crate::errors::Result;

pub use greenhouse::GreenhouseClient;

/// Trait for fetching the three raw collections for one board.
#[allow(async_fn_in_trait)]
pub trait BoardFetcher: Send + Sync {
    /// Fetch the raw office records.
    async fn fetch_offices(&self) -> Result<Vec<Value>>;

    /// Fetch the raw department records.
    async fn fetch_departments(&self) -> Result<Vec<Value>>;

    /// Fetch the raw job records, including per-posting detail.
    async fn fetch_jobs(&self) -> Result<Vec<Value>>;
}

/// Pull a collection out of a response envelope (`{"offices": [...]}` etc.).
///
/// A missing, null, or non-array field is treated as an empty collection;
/// the API omits the field for boards with no records of that kind.
pub(crate) fn collection_field(body: &Value, key: &str) -> Vec<Value> {
    match body.get(key) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}
