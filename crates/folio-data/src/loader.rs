//! Declarative data requirements of a template.

use std::fmt;
use std::sync::Arc;

use folio_core::{Locale, PageData};
use serde_json::Value;

/// Structured filter/field/population spec, passed verbatim to the fetcher.
pub type QueryParams = Value;

/// Reshapes the raw records of a query into a partial page data value.
pub type Formatter = Arc<dyn Fn(Vec<Value>) -> Value + Send + Sync>;

/// A single remote query and its optional result formatter.
#[derive(Clone)]
pub struct Query {
    /// Backend collection path, e.g. `cms-articles`.
    pub api_path: String,
    pub query: QueryParams,
    pub formatter: Option<Formatter>,
}

impl Query {
    /// Create a query without a formatter; its raw records merge as-is.
    pub fn new(api_path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            api_path: api_path.into(),
            query,
            formatter: None,
        }
    }

    /// Attach a result formatter.
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(Vec<Value>) -> Value + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Apply the formatter, or pass the raw records through as an array.
    pub fn format(&self, records: Vec<Value>) -> Value {
        match &self.formatter {
            Some(formatter) => formatter(records),
            None => Value::Array(records),
        }
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("api_path", &self.api_path)
            .field("query", &self.query)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Seed values plus the ordered queries one loader contributes.
#[derive(Debug, Clone, Default)]
pub struct LoaderSpec {
    /// Fields merged before any query result.
    pub init_value: Option<PageData>,
    /// Queries in merge-precedence order (later wins).
    pub queries: Vec<Query>,
}

impl LoaderSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed value. Non-object values are ignored.
    pub fn with_init_value(mut self, init: Value) -> Self {
        if let Value::Object(map) = init {
            self.init_value = Some(map);
        }
        self
    }

    /// Append a query.
    pub fn with_query(mut self, query: Query) -> Self {
        self.queries.push(query);
        self
    }
}

/// Builds a [`LoaderSpec`] for a locale and content slug.
pub type ContentLoader = Arc<dyn Fn(&Locale, &str) -> LoaderSpec + Send + Sync>;

/// Wrap a closure as a [`ContentLoader`].
pub fn content_loader<F>(f: F) -> ContentLoader
where
    F: Fn(&Locale, &str) -> LoaderSpec + Send + Sync + 'static,
{
    Arc::new(f)
}
