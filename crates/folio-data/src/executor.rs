//! Concurrent query execution and ordered merge.

use folio_core::{Locale, PageData};
use futures::future::try_join_all;
use serde_json::Value;

use crate::fetch::{FetchError, FetchMany};
use crate::loader::{ContentLoader, LoaderSpec, Query};

/// A page's content could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("query to {api_path} failed: {source}")]
    Query {
        api_path: String,
        #[source]
        source: FetchError,
    },
}

/// Run every loader for a page and merge the results into one page data map.
///
/// All queries of all loaders run concurrently. Merging starts once every
/// query has settled and follows declaration order: each loader's seed value
/// first, then its queries in order, then the next loader. Any failed query
/// fails the whole load.
#[tracing::instrument(skip_all, fields(locale = %locale, slug = %slug, loaders = loaders.len()))]
pub async fn load_content(
    locale: &Locale,
    slug: &str,
    loaders: &[ContentLoader],
    fetch: &dyn FetchMany,
) -> Result<PageData, ContentError> {
    let specs: Vec<LoaderSpec> = loaders.iter().map(|loader| loader(locale, slug)).collect();

    let pending = specs
        .iter()
        .flat_map(|spec| spec.queries.iter())
        .map(|query| run_query(query, fetch));
    let results = try_join_all(pending).await?;
    tracing::debug!(queries = results.len(), "all queries settled");

    let mut results = results.into_iter();
    let mut page_data = PageData::new();
    for spec in specs {
        let mut acc = spec.init_value.unwrap_or_default();
        for value in results.by_ref().take(spec.queries.len()) {
            merge_value(&mut acc, value);
        }
        page_data.extend(acc);
    }

    Ok(page_data)
}

async fn run_query(query: &Query, fetch: &dyn FetchMany) -> Result<Value, ContentError> {
    let records = fetch
        .fetch_many(&query.api_path, &query.query)
        .await
        .map_err(|source| {
            tracing::warn!(api_path = %query.api_path, error = %source, "query failed");
            ContentError::Query {
                api_path: query.api_path.clone(),
                source,
            }
        })?;
    tracing::trace!(api_path = %query.api_path, records = records.len(), "query returned");
    Ok(query.format(records))
}

/// Shallow-merge a formatted value into page data, the way object spread does.
///
/// Objects overwrite key by key, arrays contribute index keys (`"0"`, `"1"`,
/// ...), and null or scalar values contribute nothing.
pub fn merge_value(target: &mut PageData, value: Value) {
    match value {
        Value::Object(map) => target.extend(map),
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                target.insert(index.to_string(), item);
            }
        }
        Value::Null => {}
        other => tracing::debug!(value = %other, "ignoring scalar formatter result"),
    }
}
