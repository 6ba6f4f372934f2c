//! Page chrome shared by academy templates.

use folio_core::RenderContext;

const LAYOUT_CSS: &str = r#"
html { scroll-behavior: smooth; }
.site-header { display: flex; align-items: center; height: 64px; padding: 0 24px; border-bottom: 1px solid #2b313a; }
"#;

pub(crate) fn default_layout(cx: &mut RenderContext, body: &str) -> String {
    cx.style("academy-layout", LAYOUT_CSS);
    format!(r#"<header class="site-header"><a class="logo" href="/">RubyDex Academy</a></header>{body}"#)
}
