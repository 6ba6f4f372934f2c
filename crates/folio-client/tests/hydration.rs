//! Server render followed by client startup from the served document.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use folio_client::{NavigationController, RecordingHost, TransitionOutcome};
use folio_core::{page_str, Component, Locale, PageData, RenderContext, RouteAction, RouteState};
use folio_data::{content_loader, FetchError, FetchMany, LoaderSpec, Query, QueryParams};
use folio_render::{DocumentShell, HeadContent, RenderAdapter, RenderRequest};
use folio_router::{RouteResolver, StaticRouteLookup, Template, TemplateModule, TemplateRegistry};
use serde_json::{json, Value};

struct Glossary;

impl Component for Glossary {
    fn render(&self, page_data: &PageData, cx: &mut RenderContext) -> String {
        cx.style("glossary", ".glossary { display: grid; }");
        let title = page_str(page_data, "title").unwrap_or_default();
        let count = page_data
            .get("terms")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        format!(r#"<section class="glossary"><h1>{title}</h1><p>{count} terms</p></section>"#)
    }
}

fn glossary_module() -> TemplateModule {
    TemplateModule::new(Glossary).with_loader(content_loader(|locale, _slug| {
        LoaderSpec::new()
            .with_init_value(json!({"title": "The Words of Crypto"}))
            .with_query(
                Query::new("cms-articles", json!({"filters": {"locale": locale.as_str()}}))
                    .with_formatter(|data| json!({"terms": data})),
            )
    }))
}

fn registry() -> Arc<TemplateRegistry> {
    Arc::new(TemplateRegistry::new([Template::lazy("Glossary", glossary_module).with_slug("/glossary")]).unwrap())
}

#[derive(Default)]
struct CountingCms {
    calls: AtomicUsize,
}

#[async_trait]
impl FetchMany for CountingCms {
    async fn fetch_many(&self, _api_path: &str, _query: &QueryParams) -> Result<Vec<Value>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![json!({"title": "Airdrop"}), json!({"title": "Bridge"})])
    }
}

#[tokio::test]
async fn test_client_adopts_server_page_without_fetching() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("client-manifest.json");
    std::fs::write(&manifest, r#"{"entry-client-prod.ts": {"file": "js/entry.js"}}"#).unwrap();

    let server_cms = CountingCms::default();
    let adapter = RenderAdapter::new(registry(), DocumentShell::new(HeadContent::new()));
    let html = adapter
        .render(&RenderRequest::new("/en/glossary", "Glossary", &manifest), &server_cms)
        .await
        .unwrap();
    assert_eq!(server_cms.calls.load(Ordering::SeqCst), 1);

    let client_cms = Arc::new(CountingCms::default());
    let host = Arc::new(RecordingHost::new());
    let resolver = RouteResolver::new(registry(), Arc::new(StaticRouteLookup::new()));
    let controller = NavigationController::new(resolver, client_cms.clone(), host.clone());

    let initial = RouteState::new(RouteAction::Init, "/en/glossary", Locale::new("en"), "/glossary");
    controller.hydrate_document(&html, &initial).await.unwrap();

    let handle = controller.subscribe();
    let markup = handle.render().unwrap();
    assert!(html.contains(&format!(r#"<div id="root">{markup}</div>"#)));
    assert_eq!(controller.state().template_name(), Some("Glossary"));

    // The router's initial event and a repeat push are both no-ops.
    assert_eq!(controller.handle_event(initial.clone()).await, TransitionOutcome::Suppressed);
    let mut repeat = initial;
    repeat.action = RouteAction::Push;
    assert_eq!(controller.handle_event(repeat).await, TransitionOutcome::Suppressed);

    assert_eq!(client_cms.calls.load(Ordering::SeqCst), 0);
    assert!(host.calls().is_empty());
}
