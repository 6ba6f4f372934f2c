//! URL to template resolution.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use folio_data::{FetchError, FetchMany};
use serde_json::json;

use crate::registry::{Template, TemplateRegistry};

/// Backend collection mapping URLs to template names.
pub const ROUTES_API_PATH: &str = "routes";

/// Maps a request pathname to a template name.
#[async_trait]
pub trait RouteLookup: Send + Sync {
    /// The template name registered for `pathname`, if any.
    async fn template_name(&self, pathname: &str) -> Result<Option<String>, FetchError>;
}

/// Route lookup against the backend's `routes` collection.
#[derive(Debug, Clone)]
pub struct CmsRouteLookup<F> {
    fetch: F,
}

impl<F: FetchMany> CmsRouteLookup<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<F: FetchMany> RouteLookup for CmsRouteLookup<F> {
    async fn template_name(&self, pathname: &str) -> Result<Option<String>, FetchError> {
        let query = json!({
            "fields": ["url", "templateName"],
            "filters": { "url": pathname },
        });
        let records = self.fetch.fetch_many(ROUTES_API_PATH, &query).await?;
        let name = records
            .first()
            .and_then(|record| record.get("templateName"))
            .and_then(|name| name.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        Ok(name)
    }
}

/// In-memory route table.
#[derive(Debug, Clone, Default)]
pub struct StaticRouteLookup {
    routes: HashMap<String, String>,
}

impl StaticRouteLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, pathname: impl Into<String>, template: impl Into<String>) -> Self {
        self.routes.insert(pathname.into(), template.into());
        self
    }
}

#[async_trait]
impl RouteLookup for StaticRouteLookup {
    async fn template_name(&self, pathname: &str) -> Result<Option<String>, FetchError> {
        Ok(self.routes.get(pathname).cloned())
    }
}

/// Route resolution failed outright (as opposed to finding nothing).
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("route lookup for {pathname} failed: {source}")]
    Lookup {
        pathname: String,
        #[source]
        source: FetchError,
    },
}

/// Resolves a request to a template: static slug first, then route lookup.
#[derive(Clone)]
pub struct RouteResolver {
    registry: Arc<TemplateRegistry>,
    lookup: Arc<dyn RouteLookup>,
}

impl RouteResolver {
    pub fn new(registry: Arc<TemplateRegistry>, lookup: Arc<dyn RouteLookup>) -> Self {
        Self { registry, lookup }
    }

    pub fn registry(&self) -> &Arc<TemplateRegistry> {
        &self.registry
    }

    /// Find the template for a request.
    ///
    /// `Ok(None)` when neither a static slug nor the route lookup yields a
    /// known template.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn resolve(
        &self,
        slug: &str,
        pathname: &str,
        url: &str,
    ) -> Result<Option<Arc<Template>>, ResolveError> {
        if let Some(template) = self.registry.find_by_slug(slug) {
            tracing::debug!(template = template.name(), "matched static slug");
            return Ok(Some(template));
        }

        let name = self
            .lookup
            .template_name(pathname)
            .await
            .map_err(|source| ResolveError::Lookup {
                pathname: pathname.to_string(),
                source,
            })?;

        let Some(name) = name else {
            tracing::debug!("no route registered");
            return Ok(None);
        };
        match self.registry.find_by_name(&name) {
            Some(template) => Ok(Some(template)),
            None => {
                tracing::warn!(template = %name, "route names an unknown template");
                Ok(None)
            }
        }
    }
}
