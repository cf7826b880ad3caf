//! Selector chains: ordered fallback strategies for a single field.
//!
//! A chain is evaluated front to back. The first strategy that produces a
//! non-empty (after stripping) value wins and the rest are never evaluated.
//! An exhausted chain yields `None`; the caller decides what sentinel to use.

use crate::document::{Document, attr_text, joined_text, node_text};
use crate::error::{ConfigError, ExtractError};
use scraper::Selector;
use std::fmt;

/// One way of pulling a value out of a document.
///
/// `Ok(None)` means "nothing here, try the next strategy". An `Err` aborts the
/// whole record and is handled by the batch runner.
pub trait Strategy: fmt::Debug + Send + Sync {
    fn apply(&self, doc: &Document) -> Result<Option<String>, ExtractError>;
}

/// How text is read from the node(s) a CSS strategy selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Take {
    /// All descendant text of the first match, stripped.
    Text,
    /// Descendant text nodes of the first match, stripped and joined.
    Joined(String),
    /// An attribute of the first match.
    Attr(String),
    /// Stripped text of every match, joined.
    All(String),
}

/// A CSS selector plus a text rule.
pub struct Css {
    source: String,
    selector: Selector,
    take: Take,
}

impl Css {
    pub fn new(selector: &str, take: Take) -> Result<Self, ConfigError> {
        let parsed = Selector::parse(selector).map_err(|e| ConfigError::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: selector.to_string(),
            selector: parsed,
            take,
        })
    }

    pub fn text(selector: &str) -> Result<Self, ConfigError> {
        Self::new(selector, Take::Text)
    }

    pub fn attr(selector: &str, name: &str) -> Result<Self, ConfigError> {
        Self::new(selector, Take::Attr(name.to_string()))
    }
}

impl fmt::Debug for Css {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Css")
            .field("selector", &self.source)
            .field("take", &self.take)
            .finish()
    }
}

impl Strategy for Css {
    fn apply(&self, doc: &Document) -> Result<Option<String>, ExtractError> {
        let value = match &self.take {
            Take::Text => doc.find(&self.selector).map(node_text),
            Take::Joined(sep) => doc.find(&self.selector).map(|n| joined_text(n, sep)),
            Take::Attr(name) => doc.find(&self.selector).and_then(|n| attr_text(n, name)),
            Take::All(sep) => Some(
                doc.find_all(&self.selector)
                    .map(node_text)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(sep),
            ),
        };
        Ok(value)
    }
}

/// Yields the URL of the page being extracted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageUrl;

impl Strategy for PageUrl {
    fn apply(&self, doc: &Document) -> Result<Option<String>, ExtractError> {
        Ok(Some(doc.url().to_string()))
    }
}

/// Ordered fallback list of strategies for one field.
#[derive(Debug, Default)]
pub struct SelectorChain {
    strategies: Vec<Box<dyn Strategy>>,
}

impl SelectorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fallback. Builder style, so chains read top to bottom.
    pub fn or(mut self, strategy: impl Strategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn push(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    /// First non-empty stripped value, or `None` when every strategy misses.
    pub fn evaluate(&self, doc: &Document) -> Result<Option<String>, ExtractError> {
        for strategy in &self.strategies {
            if let Some(value) = strategy.apply(doc)? {
                let value = value.trim();
                if !value.is_empty() {
                    return Ok(Some(value.to_string()));
                }
            }
        }
        Ok(None)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FnStrategy;
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PAGE: &str = r#"
        <html><head>
            <meta name="description" content="A short summary">
        </head><body>
            <span id="priceblock_ourprice">   </span>
            <span class="a-price-whole">42.</span>
            <div class="zn-body__paragraph"> First. </div>
            <div class="zn-body__paragraph"></div>
            <div class="zn-body__paragraph">Second.</div>
        </body></html>
    "#;

    fn doc() -> Document {
        Document::parse("https://example.com/articles/1", PAGE.as_bytes())
    }

    #[test]
    fn test_empty_match_falls_through() {
        let chain = SelectorChain::new()
            .or(Css::text("span#priceblock_ourprice").unwrap())
            .or(Css::text("span#priceblock_dealprice").unwrap())
            .or(Css::text("span.a-price-whole").unwrap());

        assert_eq!(chain.evaluate(&doc()).unwrap().as_deref(), Some("42."));
    }

    #[test]
    fn test_later_strategies_not_evaluated() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let chain = SelectorChain::new()
            .or(FnStrategy::new("empty", |_| Ok(Some(String::new()))))
            .or(FnStrategy::new("hit", |_| Ok(Some("X".to_string()))))
            .or(FnStrategy::new("tripwire", move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(Some("Y".to_string()))
            }));

        assert_eq!(chain.evaluate(&doc()).unwrap().as_deref(), Some("X"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_exhausted_chain_is_none() {
        let chain = SelectorChain::new()
            .or(Css::text("span#productTitle").unwrap())
            .or(Css::attr("img#landingImage", "src").unwrap());
        assert_eq!(chain.evaluate(&doc()).unwrap(), None);
        assert_eq!(SelectorChain::new().evaluate(&doc()).unwrap(), None);
    }

    #[test]
    fn test_attr_and_all_rules() {
        let summary = SelectorChain::new()
            .or(Css::attr(r#"meta[name="description"]"#, "content").unwrap());
        assert_eq!(
            summary.evaluate(&doc()).unwrap().as_deref(),
            Some("A short summary")
        );

        let content = SelectorChain::new().or(Css::new(
            "div.zn-body__paragraph",
            Take::All(" ".to_string()),
        )
        .unwrap());
        assert_eq!(
            content.evaluate(&doc()).unwrap().as_deref(),
            Some("First. Second.")
        );
    }

    #[test]
    fn test_page_url() {
        let chain = SelectorChain::new().or(PageUrl);
        assert_eq!(
            chain.evaluate(&doc()).unwrap().as_deref(),
            Some("https://example.com/articles/1")
        );
    }

    #[test]
    fn test_strategy_error_propagates() {
        let chain = SelectorChain::new().or(FnStrategy::new("broken", |_| {
            Err(ExtractError {
                field: "title".to_string(),
                reason: "malformed".to_string(),
            })
        }));
        assert!(chain.evaluate(&doc()).is_err());
    }

    #[test]
    fn test_invalid_selector_rejected() {
        assert!(matches!(
            Css::text("div[["),
            Err(ConfigError::Selector { .. })
        ));
    }
}
