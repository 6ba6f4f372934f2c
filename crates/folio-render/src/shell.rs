//! HTML document shell.

use folio_core::escape_html;

/// Inline script that queues user events fired before the client takes over.
///
/// Events on server-rendered elements marked with `data-hk` are recorded in
/// `window._$HY.events` and replayed by the client runtime after hydration.
pub const HYDRATION_RUNTIME: &str = concat!(
    "(()=>{",
    "var h=window._$HY||(window._$HY={events:[],completed:new WeakSet,r:{}});",
    "var k=function(n){return n&&n.hasAttribute",
    "?(n.hasAttribute(\"data-hk\")?n:k(n.host instanceof Node?n.host:n.parentNode))",
    ":null};",
    "[\"click\",\"input\"].forEach(function(t){document.addEventListener(t,function(e){",
    "var s=e.composedPath&&e.composedPath()[0]||e.target,el=k(s);",
    "el&&!h.completed.has(el)&&h.events.push([el,e])})});",
    "h.init=function(id,r){h.r[id]=[new Promise(function(ok){r=ok}),r]};",
    "h.set=function(id,v,s){(s=h.r[id])&&s[1](v);h.r[id]=[v]};",
    "h.unset=function(id){delete h.r[id]};",
    "h.load=function(id){return h.r[id]};",
    "})();"
);

/// Site-wide `<head>` content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadContent {
    /// `<meta name=… content=…>` pairs.
    pub meta: Vec<(String, String)>,
    /// Raw `<link>` tags.
    pub links: Vec<String>,
    /// Inline stylesheets, emitted after the page's extracted CSS.
    pub styles: Vec<String>,
    /// Inline scripts.
    pub scripts: Vec<String>,
}

impl HeadContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.meta.push((name.to_string(), content.to_string()));
        self
    }

    pub fn with_stylesheet(mut self, href: &str) -> Self {
        self.links.push(format!(
            r#"<link rel="stylesheet" href="{}">"#,
            escape_html(href)
        ));
        self
    }

    pub fn with_icon(mut self, href: &str) -> Self {
        self.links.push(format!(
            r#"<link rel="shortcut icon" type="image/ico" href="{}">"#,
            escape_html(href)
        ));
        self
    }

    pub fn with_style(mut self, css: &str) -> Self {
        self.styles.push(css.trim().to_string());
        self
    }

    pub fn with_script(mut self, js: &str) -> Self {
        self.scripts.push(js.to_string());
        self
    }
}

/// Per-page values placed into the shell.
#[derive(Debug, Clone, Default)]
pub struct DocumentParts<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    /// CSS collected while rendering the component.
    pub css: &'a str,
    /// Rendered component markup.
    pub inner_html: &'a str,
    /// The `window.preloadedData=…;` statement.
    pub preloaded: &'a str,
    /// URL of the client entry module.
    pub entry: &'a str,
}

/// The document wrapped around every rendered page of a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentShell {
    pub lang: String,
    pub theme_color: String,
    pub viewport: String,
    pub head: HeadContent,
    pub body_class: Option<String>,
    /// Raw markup placed at the start of `<body>`, before the root element.
    pub body_prefix: String,
}

impl DocumentShell {
    pub fn new(head: HeadContent) -> Self {
        Self {
            head,
            ..Self::default()
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_body_class(mut self, class: impl Into<String>) -> Self {
        self.body_class = Some(class.into());
        self
    }

    pub fn with_body_prefix(mut self, html: impl Into<String>) -> Self {
        self.body_prefix = html.into();
        self
    }

    /// Render a complete document, doctype included.
    pub fn render(&self, parts: &DocumentParts<'_>) -> String {
        let mut html = String::with_capacity(parts.inner_html.len() + parts.preloaded.len() + 4096);

        html.push_str("<!DOCTYPE html>");
        html.push_str(&format!(r#"<html lang="{}">"#, escape_html(&self.lang)));
        html.push_str("<head>");
        html.push_str(r#"<meta charset="utf-8">"#);
        html.push_str(&format!(
            "<title>{}</title>",
            escape_html(parts.title.unwrap_or_default())
        ));
        html.push_str(&meta("viewport", &self.viewport));
        html.push_str(&meta("theme-color", &self.theme_color));
        html.push_str(&meta("description", parts.description.unwrap_or_default()));
        for (name, content) in &self.head.meta {
            html.push_str(&meta(name, content));
        }
        for link in &self.head.links {
            html.push_str(link);
        }
        html.push_str(&format!("<style>{}</style>", parts.css));
        for style in &self.head.styles {
            html.push_str(&format!("<style>{}</style>", style));
        }
        for script in &self.head.scripts {
            html.push_str(&format!("<script>{}</script>", script));
        }
        html.push_str(&format!("<script>{}</script>", HYDRATION_RUNTIME));
        html.push_str("</head>");

        match &self.body_class {
            Some(class) => html.push_str(&format!(r#"<body class="{}">"#, escape_html(class))),
            None => html.push_str("<body>"),
        }
        html.push_str(&self.body_prefix);
        html.push_str(&format!(r#"<div id="root">{}</div>"#, parts.inner_html));
        html.push_str(&format!("<script>{}</script>", parts.preloaded));
        html.push_str(&format!(
            r#"<script type="module" src="{}"></script>"#,
            escape_html(parts.entry)
        ));
        html.push_str("</body></html>");
        html
    }
}

impl Default for DocumentShell {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            theme_color: "#000000".to_string(),
            viewport: "initial-scale=1, maximum-scale=1, minimal-ui".to_string(),
            head: HeadContent::default(),
            body_class: None,
            body_prefix: String::new(),
        }
    }
}

fn meta(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        escape_html(name),
        escape_html(content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts<'a>(inner_html: &'a str) -> DocumentParts<'a> {
        DocumentParts {
            title: Some("Glossary"),
            description: Some("Crypto terms"),
            css: ".a{color:red}",
            inner_html,
            preloaded: r#"window.preloadedData={"templateName":"T","pageData":{}};"#,
            entry: "https://static.example.com/1/assets/entry.js",
        }
    }

    #[test]
    fn test_document_structure_order() {
        let shell = DocumentShell::new(
            HeadContent::new()
                .with_stylesheet("https://static.example.com/global.css")
                .with_style("@font-face { font-family: BASE; }")
                .with_script("window.dataLayer=[];"),
        )
        .with_body_class("dark");
        let html = shell.render(&parts("<h1>Hi</h1>"));

        assert!(html.starts_with("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">"));
        assert!(html.ends_with("</body></html>"));

        let pos = |needle: &str| html.find(needle).unwrap_or_else(|| panic!("missing {needle}"));
        assert!(pos("<title>Glossary</title>") < pos("name=\"description\" content=\"Crypto terms\""));
        assert!(pos("global.css") < pos("<style>.a{color:red}</style>"));
        assert!(pos("<style>.a{color:red}</style>") < pos("@font-face"));
        assert!(pos("window.dataLayer") < pos("window._$HY"));
        assert!(pos("</head>") < pos("<body class=\"dark\">"));
        assert!(pos("<div id=\"root\"><h1>Hi</h1></div>") < pos("window.preloadedData="));
        assert!(
            pos("window.preloadedData=")
                < pos(r#"<script type="module" src="https://static.example.com/1/assets/entry.js">"#)
        );
    }

    #[test]
    fn test_title_and_description_escaped() {
        let shell = DocumentShell::default();
        let mut p = parts("");
        p.title = Some("A <b> & \"c\"");
        p.description = None;
        let html = shell.render(&p);
        assert!(html.contains("<title>A &lt;b&gt; &amp; &quot;c&quot;</title>"));
        assert!(html.contains(r#"<meta name="description" content="">"#));
    }

    #[test]
    fn test_plain_body_without_class() {
        let html = DocumentShell::default().render(&parts(""));
        assert!(html.contains("<body><div id=\"root\"></div>"));
    }
}
