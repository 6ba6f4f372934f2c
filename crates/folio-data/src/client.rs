//! HTTP client for a Strapi-style content backend.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::fetch::{FetchError, FetchMany};
use crate::loader::QueryParams;
use crate::qs::to_query_string;
use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;

/// Timeout and retry settings for backend requests.
#[derive(Debug, Clone, Default)]
pub struct FetchPolicy {
    pub timeout: TimeoutConfig,
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

/// [`FetchMany`] over HTTP: `GET {api_base}/{api_path}?{query}`.
///
/// Responses are expected in the `{ "data": ... }` envelope; an object
/// payload is returned as a single record.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    api_base: Url,
    policy: FetchPolicy,
}

impl CmsClient {
    /// Create a client for `api_base` (e.g. `http://localhost:1337/api`).
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        Self::with_policy(api_base, FetchPolicy::default())
    }

    /// Create a client with explicit timeout and retry settings.
    pub fn with_policy(api_base: &str, policy: FetchPolicy) -> Result<Self, FetchError> {
        let api_base = Url::parse(api_base.trim_end_matches('/'))
            .map_err(|e| FetchError::Request(format!("invalid api base {api_base}: {e}")))?;
        let http = reqwest::Client::builder()
            .connect_timeout(policy.timeout.connect)
            .timeout(policy.timeout.total)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self {
            http,
            api_base,
            policy,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// The full request URL for a query.
    pub fn endpoint(&self, api_path: &str, query: &QueryParams) -> Url {
        let mut url = self.api_base.clone();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            api_path.trim_start_matches('/')
        );
        url.set_path(&path);
        let qs = to_query_string(query);
        url.set_query(if qs.is_empty() { None } else { Some(&qs) });
        url
    }

    async fn fetch_once(&self, url: &Url) -> Result<Vec<Value>, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Deserialization(e.to_string()))?;
        records_from_body(body)
    }
}

#[async_trait]
impl FetchMany for CmsClient {
    #[tracing::instrument(skip(self, query), fields(api_path = %api_path))]
    async fn fetch_many(
        &self,
        api_path: &str,
        query: &QueryParams,
    ) -> Result<Vec<Value>, FetchError> {
        let url = self.endpoint(api_path, query);
        let mut attempt = 0;
        loop {
            match self.fetch_once(&url).await {
                Ok(records) => {
                    tracing::debug!(records = records.len(), attempt, "fetched");
                    return Ok(records);
                }
                Err(err) if self.policy.retry.should_retry(&err, attempt) => {
                    let delay: Duration = self.policy.retry.backoff.delay_for_attempt(attempt);
                    tracing::warn!(error = %err, attempt, ?delay, "retrying backend request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn classify(err: reqwest::Error, url: &Url) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else if err.is_connect() {
        FetchError::Connection(err.to_string())
    } else {
        FetchError::Request(err.to_string())
    }
}

/// Extract the records from a response body.
///
/// Accepts `{ "data": [...] }`, `{ "data": {...} }` (one record),
/// `{ "data": null }` (no records) and a bare array.
pub fn records_from_body(body: Value) -> Result<Vec<Value>, FetchError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) => Ok(Vec::new()),
            Some(record @ Value::Object(_)) => Ok(vec![record]),
            Some(other) => Err(FetchError::Deserialization(format!(
                "unexpected data payload: {other}"
            ))),
            None => Err(FetchError::Deserialization(
                "response has no data field".to_string(),
            )),
        },
        other => Err(FetchError::Deserialization(format!(
            "unexpected response body: {other}"
        ))),
    }
}
