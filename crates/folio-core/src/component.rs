//! Renderable template components.

use std::fmt;

use crate::page::PageData;

/// A presentational tree that renders page data to markup.
///
/// Components register their styles with the [`RenderContext`] while
/// rendering; the server extracts them into the document head afterwards.
pub trait Component: Send + Sync {
    /// Render the component for the given page data.
    fn render(&self, page_data: &PageData, cx: &mut RenderContext) -> String;
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Component")
    }
}

/// Per-render state shared by a component tree.
#[derive(Debug, Default)]
pub struct RenderContext {
    styles: Vec<(String, String)>,
}

impl RenderContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stylesheet under an id. Registering the same id again is a
    /// no-op, so shared components can call this on every render.
    pub fn style(&mut self, id: &str, css: &str) {
        if self.styles.iter().any(|(existing, _)| existing == id) {
            return;
        }
        self.styles.push((id.to_string(), css.trim().to_string()));
    }

    /// Number of registered stylesheets.
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Drain all registered styles, in registration order, into one string.
    pub fn extract_css(&mut self) -> String {
        let css: Vec<String> = self.styles.drain(..).map(|(_, css)| css).collect();
        css.join("\n")
    }
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
