//! The data-access boundary.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::loader::QueryParams;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// Fetches the records matching a query from the content backend.
///
/// Server and client each supply their own implementation; the loader
/// executor does not care which one it talks to.
#[async_trait]
pub trait FetchMany: Send + Sync {
    /// Fetch all records for `api_path` matching `query`.
    ///
    /// Single-object endpoints return a one-element vector.
    async fn fetch_many(&self, api_path: &str, query: &QueryParams)
        -> Result<Vec<Value>, FetchError>;
}

#[async_trait]
impl<T: FetchMany + ?Sized> FetchMany for Arc<T> {
    async fn fetch_many(
        &self,
        api_path: &str,
        query: &QueryParams,
    ) -> Result<Vec<Value>, FetchError> {
        (**self).fetch_many(api_path, query).await
    }
}
