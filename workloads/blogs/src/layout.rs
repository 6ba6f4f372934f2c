//! Page chrome shared by blog templates.

use folio_core::RenderContext;

const LAYOUT_CSS: &str = r#"
html { scroll-behavior: smooth; }
.site-header { display: flex; align-items: center; height: 64px; padding: 0 24px; }
.site-footer { padding: 40px 24px; color: rgba(255, 255, 255, 0.4); }
"#;

/// Wrap page markup in the sub-site header and footer.
pub(crate) fn default_layout(cx: &mut RenderContext, body: &str) -> String {
    cx.style("blog-layout", LAYOUT_CSS);
    format!(
        r#"<header class="site-header"><a class="logo" href="/">RubyDex Blog</a></header>{body}<footer class="site-footer">© RubyDex</footer>"#
    )
}
