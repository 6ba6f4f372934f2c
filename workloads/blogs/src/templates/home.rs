//! Home feed: a grid of article cards.

use folio_core::{escape_html, page_str, Component, Locale, PageData, RenderContext};
use folio_data::{content_loader, LoaderSpec, Query};
use folio_router::TemplateModule;
use serde_json::json;

use crate::data::{feed_query, format_feed, ArticleCard, ARTICLES_API_PATH};
use crate::layout::default_layout;

const HOME_CSS: &str = r#"
.home-title { margin: 100px 0 40px 0; font-size: 64px; text-align: center; font-weight: 300; }
.card-list { display: grid; grid-template-columns: repeat(3, 1fr); gap: 60px 24px; margin: 0 auto 60px auto; max-width: 1200px; }
.card { display: block; overflow: hidden; border: 1px solid rgba(255, 255, 255, 0.2); border-radius: 20px; }
.card-image { position: relative; overflow: hidden; padding-bottom: 56%; height: 0; }
.card-image img { position: absolute; width: 100%; height: 100%; transition: all 0.3s ease; }
.card-image img:hover { transform: scale(1.05); }
"#;

pub struct HomeTemplate;

impl Component for HomeTemplate {
    fn render(&self, page_data: &PageData, cx: &mut RenderContext) -> String {
        cx.style("blog-home", HOME_CSS);
        let title = page_str(page_data, "title").unwrap_or_default();
        let articles: Vec<ArticleCard> = page_data
            .get("articles")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        let page_locale = page_str(page_data, "locale")
            .map(Locale::new)
            .unwrap_or_default();
        let cards: String = articles.iter().map(|card| render_card(card, &page_locale)).collect();
        let body = format!(
            r#"<h1 class="home-title">{}</h1><div class="card-list">{}</div>"#,
            escape_html(title),
            cards
        );
        default_layout(cx, &body)
    }
}

/// Link to an article page: `/{locale}/{slug}`.
fn card_href(card: &ArticleCard, page_locale: &Locale) -> String {
    let locale = if card.locale.is_empty() {
        page_locale.as_str()
    } else {
        card.locale.as_str()
    };
    format!("/{}/{}", locale, card.slug.trim_start_matches('/'))
}

fn render_card(card: &ArticleCard, page_locale: &Locale) -> String {
    format!(
        r#"<a class="card" href="{}"><div class="card-image"><img src="{}" alt=""></div><div class="card-body"><div class="card-title">{}</div><div class="card-desc">{}</div></div></a>"#,
        escape_html(&card_href(card, page_locale)),
        escape_html(&card.image),
        escape_html(&card.title),
        escape_html(&card.desc)
    )
}

pub fn module() -> TemplateModule {
    TemplateModule::new(HomeTemplate).with_loader(content_loader(|locale, _slug| {
        LoaderSpec::new()
            .with_init_value(json!({ "title": "RubyDex Blog", "locale": locale.as_str() }))
            .with_query(Query::new(ARTICLES_API_PATH, feed_query(locale)).with_formatter(format_feed))
    }))
}
