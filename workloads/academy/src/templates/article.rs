//! Single academy article.

use folio_core::{escape_html, Component, PageData, RenderContext};
use folio_data::{content_loader, LoaderSpec, Query};
use folio_router::TemplateModule;
use serde_json::Value;

use crate::data::{article_query, format_article, ArticleDetail, ARTICLES_API_PATH};
use crate::layout::default_layout;

const ARTICLE_CSS: &str = r#"
.lesson-main { margin: 0 auto; max-width: 768px; padding: 48px 16px; }
.lesson-desc { color: rgba(255, 255, 255, 0.6); }
.lesson-content { margin-top: 24px; color: rgba(255, 255, 255, 0.8); }
.lesson-content img { max-width: 100%; }
"#;

pub struct ArticleTemplate;

impl Component for ArticleTemplate {
    fn render(&self, page_data: &PageData, cx: &mut RenderContext) -> String {
        cx.style("academy-article", ARTICLE_CSS);
        let article: ArticleDetail =
            serde_json::from_value(Value::Object(page_data.clone())).unwrap_or_default();
        let body = format!(
            r#"<main class="lesson-main"><h1>{}</h1><p class="lesson-desc">{}</p><article class="lesson-content">{}</article></main>"#,
            escape_html(&article.title),
            escape_html(&article.desc),
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
