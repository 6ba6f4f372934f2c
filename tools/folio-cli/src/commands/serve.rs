//! Development server rendering every request on the fly.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use folio_core::pathname_of;
use http::{StatusCode, Uri};

use super::ServeArgs;
use crate::context::Context;
use crate::pipeline::Pipeline;

pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let pipeline = Arc::new(ctx.pipeline()?);
    let addr = args.addr.unwrap_or_else(|| ctx.config.serve.addr.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    ctx.output
        .success(&format!("Serving {} on http://{}", pipeline.site(), addr));
    ctx.output.info("Press Ctrl+C to stop");

    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("Server error")?;
    Ok(())
}

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new().fallback(page).with_state(pipeline)
}

async fn page(State(pipeline): State<Arc<Pipeline>>, uri: Uri) -> Response {
    let url = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    respond(&pipeline, &url).await
}

/// Resolve and render one URL into an HTTP response.
pub async fn respond(pipeline: &Pipeline, url: &str) -> Response {
    if pathname_of(url) == "/favicon.ico" {
        return (StatusCode::OK, "").into_response();
    }

    let template = match pipeline.template_for(url).await {
        Ok(Some(name)) => name,
        Ok(None) => return (StatusCode::NOT_FOUND, "templateName not found").into_response(),
        Err(e) => {
            tracing::error!(url, error = %e, "route lookup failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    match pipeline.render(url, &template).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(url, template = %template, error = %e, "render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::pipeline::tests::{academy, Canned};

    async fn body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_favicon_is_empty() {
        let (pipeline, _dir) = academy(Canned::default());
        let response = respond(&pipeline, "/favicon.ico").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await, "");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (pipeline, _dir) = academy(Canned::default());
        let response = respond(&pipeline, "/en/nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await, "templateName not found");
    }

    #[tokio::test]
    async fn test_renders_routed_page() {
        let fetch = Canned::default()
            .with_route("/en/what-is-defi", "AcademyArticle")
            .with(
                "cms-articles",
                vec![json!({"title": "What is DeFi", "desc": "Basics", "content": "<p>Open finance</p>"})],
            );
        let (pipeline, _dir) = academy(fetch);
        let response = respond(&pipeline, "/en/what-is-defi").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body(response).await;
        assert!(html.contains("<title>What is DeFi</title>"));
        assert!(html.contains("<p>Open finance</p>"));
    }

    #[tokio::test]
    async fn test_render_failure_is_500() {
        let (pipeline, dir) = academy(Canned::default());
        std::fs::remove_file(dir.path().join("manifest.json")).unwrap();
        let response = respond(&pipeline, "/en/glossary").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
