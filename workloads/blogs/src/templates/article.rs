//! Single article page.

use folio_core::{escape_html, Component, PageData, RenderContext};
use folio_data::{content_loader, LoaderSpec, Query};
use folio_router::TemplateModule;
use serde_json::Value;

use crate::data::{article_query, format_article, ArticleDetail, ARTICLES_API_PATH};
use crate::layout::default_layout;

const ARTICLE_CSS: &str = r#"
.article-main { display: flex; flex-direction: column; align-items: center; }
.article-body { max-width: 768px; }
.header-image-wrap { border-radius: 8px; overflow: hidden; font-size: 0; }
.header-image { display: block; max-width: 768px; max-height: 432px; }
.article-title { margin-top: 48px; }
.article-content { margin-top: 24px; color: rgba(255, 255, 255, 0.8); }
.article-content img { max-width: 100%; }
@media screen and (max-width: 640px) {
  .header-image-wrap { border-radius: 0; }
  .header-image { width: 100%; max-width: 100%; }
  .article-title, .article-content { padding: 0 16px; }
}
"#;

pub struct ArticleTemplate;

impl Component for ArticleTemplate {
    fn render(&self, page_data: &PageData, cx: &mut RenderContext) -> String {
        cx.style("blog-article", ARTICLE_CSS);
        let article: ArticleDetail =
            serde_json::from_value(Value::Object(page_data.clone())).unwrap_or_default();
        let image = article
            .header_image
            .and_then(|media| media.url)
            .unwrap_or_default();

        let body = format!(
            r#"<main class="article-main"><div class="article-body"><div class="header-image-wrap"><img class="header-image" src="{}" alt=""></div><h1 class="article-title">{}</h1><article class="article-content">{}</article></div></main>"#,
            escape_html(&image),
            escape_html(&article.title),
            article.content
        );
        default_layout(cx, &body)
    }
}

pub fn module() -> TemplateModule {
    TemplateModule::new(ArticleTemplate).with_loader(content_loader(|locale, slug| {
        LoaderSpec::new()
            .with_query(Query::new(ARTICLES_API_PATH, article_query(locale, slug)).with_formatter(format_article))
    }))
}
