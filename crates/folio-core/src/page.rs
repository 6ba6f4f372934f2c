//! Page data and the preloaded bootstrap payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Merged, template-specific payload passed to a component.
pub type PageData = Map<String, Value>;

/// Global the server assigns the bootstrap payload to.
pub const PRELOADED_GLOBAL: &str = "window.preloadedData";

/// Bridge object serialized into the server HTML and read back by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreloadedData {
    /// Name of the template the server rendered.
    pub template_name: String,
    /// Page data the server computed for that template.
    #[serde(default)]
    pub page_data: PageData,
}

/// Errors reading or writing the bootstrap payload.
#[derive(Debug, thiserror::Error)]
pub enum PreloadedError {
    #[error("no window.preloadedData assignment found in document")]
    Missing,

    #[error("unterminated window.preloadedData assignment")]
    Unterminated,

    #[error("invalid preloaded payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl PreloadedData {
    /// Create a new payload.
    pub fn new(template_name: impl Into<String>, page_data: PageData) -> Self {
        Self {
            template_name: template_name.into(),
            page_data,
        }
    }

    /// Payload used when no server render happened (development bootstrap).
    pub fn empty() -> Self {
        Self::new("", PageData::new())
    }

    /// Whether this payload names no template.
    pub fn is_empty(&self) -> bool {
        self.template_name.is_empty()
    }

    /// Serialize as JSON that is safe to embed inside a `<script>` element.
    ///
    /// `<`, `>` and `&` are written as `\u003c`, `\u003e` and `\u0026`, and the
    /// JavaScript line terminators U+2028/U+2029 are escaped. The result is
    /// still valid JSON and parses back to the same value.
    pub fn to_script_json(&self) -> Result<String, PreloadedError> {
        let json = serde_json::to_string(self)?;
        Ok(escape_script_json(&json))
    }

    /// Render the bootstrap assignment statement.
    pub fn to_assignment(&self) -> Result<String, PreloadedError> {
        Ok(format!("{}={};", PRELOADED_GLOBAL, self.to_script_json()?))
    }

    /// Read the payload back out of a served HTML document.
    ///
    /// The bootstrap script is the last `<script>window.preloadedData=`
    /// in the document; rendered markup before it may contain the same text.
    pub fn from_document(html: &str) -> Result<Self, PreloadedError> {
        let marker = format!("<script>{}=", PRELOADED_GLOBAL);
        let start = html.rfind(&marker).ok_or(PreloadedError::Missing)? + marker.len();
        let rest = &html[start..];
        let end = rest.find(";</script>").ok_or(PreloadedError::Unterminated)?;
        Ok(serde_json::from_str(&rest[..end])?)
    }
}

fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Read a string field out of page data.
pub fn page_str<'a>(data: &'a PageData, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}
