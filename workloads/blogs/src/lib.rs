//! Blog sub-site.
//!
//! Two templates:
//! - `BlogHome` - article card feed for a locale
//! - `BlogArticle` - a single article, resolved through the route table

mod data;
mod layout;
mod templates;

use folio_render::{DocumentShell, HeadContent};
use folio_router::{RegistryError, Template, TemplateRegistry};

pub use data::*;
pub use templates::*;

/// Host the rendered pages are uploaded under.
pub const HOST: &str = "blog.rubydex.com";

const GTM_ID: &str = "GTM-KFNNBFG";

/// All blog templates.
pub fn templates() -> Vec<Template> {
    vec![
        Template::lazy(BLOG_HOME, home::module),
        Template::lazy(BLOG_ARTICLE, article::module),
    ]
}

pub fn registry() -> Result<TemplateRegistry, RegistryError> {
    TemplateRegistry::new(templates())
}

/// The document shell shared by every blog page.
pub fn document() -> DocumentShell {
    let head = HeadContent::new()
        .with_icon("https://img.rubydex.com/ebd16b/favicon.ico")
        .with_stylesheet("https://static.rubydex.com/000/css/global-6c8fc9.css")
        .with_stylesheet("https://static.rubydex.com/000/css/global-xs-2a521e.css")
        .with_style(FONT_FACES)
        .with_script(&gtm_script(GTM_ID));

    DocumentShell::new(head)
        .with_body_class("dark")
        .with_body_prefix(format!(
            r#"<noscript><iframe src="https://www.googletagmanager.com/ns.html?id={GTM_ID}" height="0" width="0" style="display:none;visibility:hidden"></iframe></noscript>"#
        ))
}

const FONT_FACES: &str = r#"
html,
body,
#root {
  background: #000;
}
@font-face {
  font-family: BASE;
  src: url('https://static.rubydex.com/100/font/Eina03-Regular.woff2') format('woff2');
  font-weight: 400;
}
@font-face {
  font-family: BASE;
  src: url('https://static.rubydex.com/100/font/Eina03-Bold.woff2') format('woff2');
  font-weight: 700;
}"#;

fn gtm_script(id: &str) -> String {
    format!(
        "(function(w,d,s,l,i){{w[l]=w[l]||[];w[l].push({{'gtm.start':new Date().getTime(),event:'gtm.js'}});\
var f=d.getElementsByTagName(s)[0],j=d.createElement(s),dl=l!='dataLayer'?'&l='+l:'';j.async=true;\
j.src='https://www.googletagmanager.com/gtm.js?id='+i+dl;f.parentNode.insertBefore(j,f);}})\
(window,document,'script','dataLayer','{id}');"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_no_static_slugs() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.find_by_name(BLOG_HOME).is_some());
        assert!(registry.find_by_name(BLOG_ARTICLE).is_some());
        assert!(registry.templates().all(|t| t.slug().is_none()));
    }

    #[test]
    fn test_document_shell() {
        let shell = document();
        assert_eq!(shell.body_class.as_deref(), Some("dark"));
        assert!(shell.body_prefix.contains(GTM_ID));
        assert!(shell.head.scripts[0].contains("'GTM-KFNNBFG'"));
        assert_eq!(shell.head.links.len(), 3);
    }
}
