//! A configured site ready to resolve and render URLs.

use std::path::PathBuf;
use std::sync::Arc;

use folio_core::{pathname_of, LocalePrefixParser, PathParser};
use folio_data::FetchMany;
use folio_render::{RenderAdapter, RenderError, RenderRequest};
use folio_router::{CmsRouteLookup, RegistryError, ResolveError, RouteResolver};

use crate::site::Site;

/// Route resolver and render adapter for one site, sharing one fetcher.
pub struct Pipeline {
    site: Site,
    parser: Arc<LocalePrefixParser>,
    resolver: RouteResolver,
    adapter: RenderAdapter,
    fetch: Arc<dyn FetchMany>,
    manifest: PathBuf,
}

impl Pipeline {
    pub fn new(
        site: Site,
        locales: &[String],
        manifest: PathBuf,
        asset_base: &str,
        fetch: Arc<dyn FetchMany>,
    ) -> Result<Self, RegistryError> {
        let registry = Arc::new(site.registry()?);
        let parser = Arc::new(LocalePrefixParser::new(locales));
        let lookup = Arc::new(CmsRouteLookup::new(Arc::clone(&fetch)));
        let resolver = RouteResolver::new(Arc::clone(&registry), lookup);
        let adapter = RenderAdapter::new(registry, site.document())
            .with_parser(parser.clone())
            .with_asset_base(asset_base);
        Ok(Self {
            site,
            parser,
            resolver,
            adapter,
            fetch,
            manifest,
        })
    }

    pub fn site(&self) -> Site {
        self.site
    }

    /// Template name for a URL: static slug first, then the backend route table.
    pub async fn template_for(&self, url: &str) -> Result<Option<String>, ResolveError> {
        let info = self.parser.parse(url);
        let template = self
            .resolver
            .resolve(&info.slug, pathname_of(url), url)
            .await?;
        Ok(template.map(|t| t.name().to_string()))
    }

    pub async fn render(&self, url: &str, template_name: &str) -> Result<String, RenderError> {
        let request = RenderRequest::new(url, template_name, self.manifest.clone());
        self.adapter.render(&request, self.fetch.as_ref()).await
    }
}
