//! Parsed page wrapper around `scraper::Html`.
//!
//! Lookups return `Option`/iterators rather than failing, so the extractor can
//! scan strategies without any error handling for "not found".

use scraper::{ElementRef, Html, Selector};

/// A fetched page, parsed and tagged with the URL it came from.
pub struct Document {
    url: String,
    html: Html,
}

impl Document {
    /// Parse a raw response body. Invalid UTF-8 is replaced rather than rejected.
    pub fn parse(url: &str, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        Self {
            url: url.to_string(),
            html: Html::parse_document(&text),
        }
    }

    /// The URL this document was fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// First node matching `selector` in document order.
    pub fn find(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// All nodes matching `selector` in document order.
    pub fn find_all<'a, 'b>(
        &'a self,
        selector: &'b Selector,
    ) -> impl Iterator<Item = ElementRef<'a>> {
        self.html.select(selector)
    }
}

/// All descendant text of `node`, concatenated, then stripped.
pub fn node_text(node: ElementRef<'_>) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// Each descendant text node stripped, empty ones dropped, joined with `separator`.
pub fn joined_text(node: ElementRef<'_>, separator: &str) -> String {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Attribute value of `node`, stripped.
pub fn attr_text(node: ElementRef<'_>, name: &str) -> Option<String> {
    node.value().attr(name).map(|v| v.trim().to_string())
}
