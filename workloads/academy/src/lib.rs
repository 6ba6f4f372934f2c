//! Academy sub-site.
//!
//! Three templates:
//! - `AcademyHome` - latest lessons, bound to `/`
//! - `AcademyGlossary` - alphabetical term index, bound to `/glossary`
//! - `AcademyArticle` - a single lesson or term, resolved through the route table

mod data;
mod layout;
mod templates;

use folio_render::{DocumentShell, HeadContent};
use folio_router::{RegistryError, Template, TemplateRegistry};

pub use data::*;
pub use templates::*;

/// Host the rendered pages are uploaded under.
pub const HOST: &str = "academy.rubydex.com";

pub fn templates() -> Vec<Template> {
    vec![
        Template::lazy(ACADEMY_HOME, home::module).with_slug("/"),
        Template::lazy(ACADEMY_GLOSSARY, glossary::module).with_slug("/glossary"),
        Template::lazy(ACADEMY_ARTICLE, article::module),
    ]
}

pub fn registry() -> Result<TemplateRegistry, RegistryError> {
    TemplateRegistry::new(templates())
}

/// The document shell shared by every academy page.
pub fn document() -> DocumentShell {
    let head = HeadContent::new()
        .with_icon("https://img.rubydex.com/ebd16b/favicon.ico")
        .with_stylesheet("https://static.rubydex.com/000/css/global-6c8fc9.css")
        .with_stylesheet("https://static.rubydex.com/000/css/global-xs-2a521e.css")
        .with_style(
            r#"
html,
body,
#root {
  background: #000;
}
@font-face {
  font-family: BASE;
  src: url('https://static.rubydex.com/100/font/Eina03-Regular.woff2') format('woff2');
  font-weight: 400;
}"#,
        );
    DocumentShell::new(head).with_body_class("dark")
}
