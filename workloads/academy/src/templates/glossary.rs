//! Glossary index: terms grouped by initial.

use folio_core::{escape_html, Component, PageData, RenderContext};
use folio_data::{content_loader, LoaderSpec, Query};
use folio_router::TemplateModule;
use serde_json::json;

use crate::data::{format_glossary, glossary_query, ArticleGroup, ArticleSummary, ARTICLES_API_PATH};
use crate::layout::default_layout;

const GLOSSARY_CSS: &str = r#"
.glossary-banner {
  display: flex; align-items: center; margin: 0 auto; padding-left: 20px; height: 220px; max-width: 1280px;
  font-size: 36px; font-weight: 300;
  border: 1px solid #2b313a; border-top: none;
  background-image: url('https://img.rubydex.com/v1/f0986f20/glossary-bg.png');
  background-repeat: no-repeat; background-position-x: right;
}
.glossary-main { display: flex; margin: 0 auto; max-width: 1280px; border: 1px solid #2b313a; border-top: none; }
.glossary-sidebar { width: 240px; border-right: 1px solid #2b313a; }
.glossary-search {
  box-sizing: border-box; width: 100%; padding: 0 12px; line-height: 48px;
  border: 1px solid #2b313a; border-radius: 4px; background: transparent; color: #fff; outline: none;
}
.group-list { flex: 1; margin: 0 auto 60px auto; max-width: 1200px; }
.group-key { padding: 0 40px; line-height: 96px; font-size: 24px; border-bottom: 1px solid #2b313a; }
.term { display: block; padding: 36px 40px; border-bottom: 1px solid #2b313a; }
.term:hover { background: #223241; }
"#;

pub struct GlossaryTemplate;

impl Component for GlossaryTemplate {
    fn render(&self, page_data: &PageData, cx: &mut RenderContext) -> String {
        cx.style("academy-glossary", GLOSSARY_CSS);
        let groups: Vec<ArticleGroup> = page_data
            .get("articleGroups")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        let list: String = groups.iter().filter(|g| !g.articles.is_empty()).map(render_group).collect();
        let body = format!(
            concat!(
                r#"<div class="glossary-banner">The Words<br>of Crypto</div>"#,
                r#"<div class="glossary-main">"#,
                r#"<div class="glossary-sidebar"><input class="glossary-search" placeholder="Search term here" value=""></div>"#,
                r#"<div class="group-list">{}</div>"#,
                "</div>"
            ),
            list
        );
        default_layout(cx, &body)
    }
}

fn render_group(group: &ArticleGroup) -> String {
    let terms: String = group.articles.iter().map(render_term).collect();
    format!(
        r#"<div class="group"><div class="group-key">{}</div>{}</div>"#,
        escape_html(&group.key),
        terms
    )
}

fn render_term(term: &ArticleSummary) -> String {
    format!(
        r#"<a class="term" href="/{}/{}"><div class="term-title">{}</div><div class="term-desc">{}</div></a>"#,
        escape_html(&term.locale),
        escape_html(&term.slug),
        escape_html(&term.title),
        escape_html(&term.desc)
    )
}

pub fn module() -> TemplateModule {
    TemplateModule::new(GlossaryTemplate).with_loader(content_loader(|locale, _slug| {
        LoaderSpec::new()
            .with_init_value(json!({ "title": "The Words of Crypto" }))
            .with_query(Query::new(ARTICLES_API_PATH, glossary_query(locale)).with_formatter(format_glossary))
    }))
}

#[cfg(test)]
mod tests {
    use folio_core::Locale;
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_formatted_groups_render_in_order() {
        let spec = (module().page_data_loaders[0])(&Locale::new("en"), "/glossary");
        let formatted = spec.queries[0].format(vec![
            json!({"locale": "en", "slug": "zk", "title": "Zero Knowledge"}),
            json!({"locale": "en", "slug": "1inch", "title": "1inch"}),
        ]);
        let Value::Object(data) = formatted else { unreachable!() };

        let html = GlossaryTemplate.render(&data, &mut RenderContext::new());
        let hash = html.find(r#"<div class="group-key">#</div>"#).unwrap();
        let z = html.find(r#"<div class="group-key">Z</div>"#).unwrap();
        assert!(hash < z);
        assert!(html.contains(r#"href="/en/1inch""#));
    }

    #[test]
    fn test_init_title() {
        let spec = (module().page_data_loaders[0])(&Locale::new("en"), "/glossary");
        assert_eq!(spec.init_value.unwrap()["title"], "The Words of Crypto");
    }
}
