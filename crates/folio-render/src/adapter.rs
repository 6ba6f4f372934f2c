//! Server render entry point.

use std::path::PathBuf;
use std::sync::Arc;

use folio_core::{
    page_str, LocalePrefixParser, PathParser, PipelinePhase, PreloadedData, PreloadedError,
    RenderContext, RequestId, TimingContext,
};
use folio_data::{load_content, ContentError, FetchMany};
use folio_router::{RegistryError, TemplateRegistry};

use crate::manifest::{ManifestCache, ManifestError};
use crate::shell::{DocumentParts, DocumentShell};

/// One page to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Request URL, e.g. `/en/glossary`.
    pub url: String,
    /// Template chosen for the URL.
    pub template_name: String,
    /// Client build manifest to take the entry script from.
    pub build_manifest_file: PathBuf,
}

impl RenderRequest {
    pub fn new(
        url: impl Into<String>,
        template_name: impl Into<String>,
        build_manifest_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            url: url.into(),
            template_name: template_name.into(),
            build_manifest_file: build_manifest_file.into(),
        }
    }
}

/// Server render failures. None of them produce output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template not found: {template_name} (url: {url})")]
    TemplateNotFound { template_name: String, url: String },

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Module(#[from] RegistryError),

    #[error("failed to encode bootstrap payload: {0}")]
    Bootstrap(#[from] PreloadedError),
}

/// Renders complete HTML documents for a site's templates.
pub struct RenderAdapter {
    registry: Arc<TemplateRegistry>,
    shell: DocumentShell,
    parser: Arc<dyn PathParser>,
    asset_base: String,
    manifests: ManifestCache,
}

impl RenderAdapter {
    /// Create an adapter with an `en`-only locale parser and assets at `/`.
    pub fn new(registry: Arc<TemplateRegistry>, shell: DocumentShell) -> Self {
        Self {
            registry,
            shell,
            parser: Arc::new(LocalePrefixParser::default()),
            asset_base: "/".to_string(),
            manifests: ManifestCache::new(),
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn PathParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Base URL the manifest's file paths are relative to.
    pub fn with_asset_base(mut self, asset_base: impl Into<String>) -> Self {
        self.asset_base = asset_base.into();
        self
    }

    pub fn registry(&self) -> &Arc<TemplateRegistry> {
        &self.registry
    }

    /// Render one page to a complete HTML document.
    #[tracing::instrument(
        skip(self, request, fetch),
        fields(request_id = %RequestId::generate(), url = %request.url, template = %request.template_name)
    )]
    pub async fn render(
        &self,
        request: &RenderRequest,
        fetch: &dyn FetchMany,
    ) -> Result<String, RenderError> {
        let mut timing = TimingContext::new();

        timing.begin(PipelinePhase::Resolve);
        let info = self.parser.parse(&request.url);
        let template = self
            .registry
            .find_by_name(&request.template_name)
            .ok_or_else(|| RenderError::TemplateNotFound {
                template_name: request.template_name.clone(),
                url: request.url.clone(),
            })?;
        timing.end(PipelinePhase::Resolve);

        timing.begin(PipelinePhase::Materialize);
        let module = template.materialize().await?;
        timing.end(PipelinePhase::Materialize);

        timing.begin(PipelinePhase::Load);
        let page_data = load_content(&info.locale, &info.slug, &module.page_data_loaders, fetch).await?;
        timing.end(PipelinePhase::Load);

        timing.begin(PipelinePhase::Manifest);
        let manifest = self.manifests.get(&request.build_manifest_file).await?;
        let entry = manifest.client_entry_url(&self.asset_base)?;
        timing.end(PipelinePhase::Manifest);

        timing.begin(PipelinePhase::Render);
        let mut cx = RenderContext::new();
        let inner_html = module.component.render(&page_data, &mut cx);
        let css = cx.extract_css();

        let title = page_str(&page_data, "title").map(str::to_string);
        let description = page_str(&page_data, "desc").map(str::to_string);
        let preloaded = PreloadedData::new(template.name(), page_data).to_assignment()?;

        let html = self.shell.render(&DocumentParts {
            title: title.as_deref(),
            description: description.as_deref(),
            css: &css,
            inner_html: &inner_html,
            preloaded: &preloaded,
            entry: &entry,
        });
        timing.end(PipelinePhase::Render);

        timing.log_summary("render");
        tracing::info!(bytes = html.len(), "rendered page");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use folio_core::{Component, PageData};
    use folio_data::{content_loader, FetchError, LoaderSpec, Query, QueryParams};
    use folio_router::{Template, TemplateModule};
    use serde_json::{json, Value};

    use super::*;
    use crate::shell::HeadContent;

    struct Article;

    impl Component for Article {
        fn render(&self, page_data: &PageData, cx: &mut RenderContext) -> String {
            cx.style("article", ".article { padding: 8px; }");
            let title = page_str(page_data, "title").unwrap_or_default();
            format!(r#"<article class="article"><h1>{}</h1></article>"#, folio_core::escape_html(title))
        }
    }

    fn article_module() -> TemplateModule {
        TemplateModule::new(Article).with_loader(content_loader(|locale, slug| {
            LoaderSpec::new()
                .with_init_value(json!({"desc": "Articles"}))
                .with_query(
                    Query::new(
                        "cms-articles",
                        json!({"filters": {"locale": locale.as_str(), "slug": slug.trim_start_matches('/')}}),
                    )
                    .with_formatter(|data| data.into_iter().next().unwrap_or_default()),
                )
        }))
    }

    /// Renders `content` as trusted HTML.
    struct Trusted;

    impl Component for Trusted {
        fn render(&self, page_data: &PageData, _cx: &mut RenderContext) -> String {
            page_str(page_data, "content").unwrap_or_default().to_string()
        }
    }

    fn explainer_module() -> TemplateModule {
        TemplateModule::new(Trusted).with_loader(content_loader(|_, _| {
            LoaderSpec::new().with_init_value(json!({
                "title": "How hydration works",
                "content": "<p>The server writes window.preloadedData={...}; before the entry script.</p>",
            }))
        }))
    }

    struct Articles {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl FetchMany for Articles {
        async fn fetch_many(
            &self,
            _api_path: &str,
            query: &QueryParams,
        ) -> Result<Vec<Value>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Timeout("cms".into()));
            }
            let slug = query["filters"]["slug"].as_str().unwrap_or_default();
            Ok(vec![json!({"title": format!("<{slug}>"), "slug": slug})])
        }
    }

    fn backend(fail: bool) -> Articles {
        Articles {
            calls: AtomicUsize::new(0),
            fail,
        }
    }

    fn adapter() -> RenderAdapter {
        let registry = TemplateRegistry::new([
            Template::lazy("BlogArticle", article_module),
            Template::lazy("BlogExplainer", explainer_module),
        ])
        .unwrap();
        RenderAdapter::new(Arc::new(registry), DocumentShell::new(HeadContent::new()))
            .with_asset_base("https://static.example.com/7")
    }

    fn manifest(dir: &Path) -> PathBuf {
        let path = dir.join("client-manifest.json");
        std::fs::write(&path, r#"{"entry-client-prod.ts": {"file": "js/entry.js"}}"#).unwrap();
        path
    }

    #[tokio::test]
    async fn test_render_full_document() {
        let dir = tempfile::tempdir().unwrap();
        let request = RenderRequest::new("/en/defi-101", "BlogArticle", manifest(dir.path()));
        let html = adapter().render(&request, &backend(false)).await.unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>&lt;defi-101&gt;</title>"));
        assert!(html.contains(r#"<meta name="description" content="Articles">"#));
        assert!(html.contains("<style>.article { padding: 8px; }</style>"));
        assert!(html.contains(r#"<div id="root"><article class="article"><h1>&lt;defi-101&gt;</h1></article></div>"#));
        assert!(html.contains(r#"src="https://static.example.com/7/js/entry.js""#));

        let preloaded = PreloadedData::from_document(&html).unwrap();
        assert_eq!(preloaded.template_name, "BlogArticle");
        assert_eq!(preloaded.page_data["title"], "<defi-101>");
        assert_eq!(preloaded.page_data["desc"], "Articles");
    }

    #[tokio::test]
    async fn test_bootstrap_survives_marker_text_in_content() {
        let dir = tempfile::tempdir().unwrap();
        let request = RenderRequest::new("/en/hydration", "BlogExplainer", manifest(dir.path()));
        let html = adapter().render(&request, &backend(false)).await.unwrap();
        assert!(html.contains("<p>The server writes window.preloadedData={...}; before the entry script.</p>"));

        let preloaded = PreloadedData::from_document(&html).unwrap();
        assert_eq!(preloaded.template_name, "BlogExplainer");
        assert_eq!(preloaded.page_data["title"], "How hydration works");
    }

    #[tokio::test]
    async fn test_unknown_template_is_fatal_without_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let request = RenderRequest::new("/en/x", "Nope", manifest(dir.path()));
        let fetch = backend(false);
        let err = adapter().render(&request, &fetch).await.unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound { ref template_name, .. } if template_name == "Nope"));
        assert_eq!(fetch.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_content_failure_produces_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let request = RenderRequest::new("/en/defi-101", "BlogArticle", manifest(dir.path()));
        let err = adapter().render(&request, &backend(true)).await.unwrap_err();
        assert!(matches!(err, RenderError::Content(_)));
    }

    #[tokio::test]
    async fn test_missing_manifest_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client-manifest.json");
        std::fs::write(&path, r#"{"entry-client-dev.ts": {"file": "js/dev.js"}}"#).unwrap();
        let request = RenderRequest::new("/en/defi-101", "BlogArticle", path);
        let err = adapter().render(&request, &backend(false)).await.unwrap_err();
        assert!(matches!(err, RenderError::Manifest(ManifestError::MissingEntry { .. })));

        let request = RenderRequest::new("/en/defi-101", "BlogArticle", dir.path().join("absent.json"));
        let err = adapter().render(&request, &backend(false)).await.unwrap_err();
        assert!(matches!(err, RenderError::Manifest(ManifestError::Read { .. })));
    }
}
