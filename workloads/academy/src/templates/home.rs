//! Academy landing page with the latest lessons.

use folio_core::{escape_html, page_str, Component, PageData, RenderContext};
use folio_data::{content_loader, LoaderSpec, Query};
use folio_router::TemplateModule;
use serde_json::json;

use crate::data::{format_lessons, lessons_query, ArticleSummary, ARTICLES_API_PATH};
use crate::layout::default_layout;

const HOME_CSS: &str = r#"
.academy-title { margin: 80px 0 40px 0; font-size: 56px; font-weight: 300; text-align: center; }
.lesson-list { margin: 0 auto 60px auto; max-width: 960px; }
.lesson { display: block; padding: 24px 40px; border-bottom: 1px solid #2b313a; }
"#;

pub struct HomeTemplate;

impl Component for HomeTemplate {
    fn render(&self, page_data: &PageData, cx: &mut RenderContext) -> String {
        cx.style("academy-home", HOME_CSS);
        let lessons: Vec<ArticleSummary> = page_data
            .get("articles")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let items: String = lessons
            .iter()
            .map(|lesson| {
                format!(
                    r#"<a class="lesson" href="/{}/{}"><div class="lesson-title">{}</div><div class="lesson-desc">{}</div></a>"#,
                    escape_html(&lesson.locale),
                    escape_html(&lesson.slug),
                    escape_html(&lesson.title),
                    escape_html(&lesson.desc)
                )
            })
            .collect();
        let body = format!(
            r#"<h1 class="academy-title">{}</h1><div class="lesson-list">{}</div>"#,
            escape_html(page_str(page_data, "title").unwrap_or_default()),
            items
        );
        default_layout(cx, &body)
    }
}

pub fn module() -> TemplateModule {
    TemplateModule::new(HomeTemplate).with_loader(content_loader(|locale, _slug| {
        LoaderSpec::new()
            .with_init_value(json!({ "title": "RubyDex Academy" }))
            .with_query(Query::new(ARTICLES_API_PATH, lessons_query(locale)).with_formatter(format_lessons))
    }))
}
