//! Listing-page discovery: turn one listing URL into an ordered list of item URLs.

use crate::document::Document;
use crate::error::{ConfigError, DiscoveryError};
use crate::fetch::Fetch;
use itertools::Itertools;
use regex::Regex;
use scraper::Selector;
use tracing::{debug, info, instrument};
use url::Url;

/// Which raw `href` values are kept.
#[derive(Debug, Clone)]
pub enum LinkFilter {
    /// Keep every link.
    Any,
    /// Keep links containing any of these substrings.
    Contains(Vec<String>),
    /// Keep links matching this pattern.
    Pattern(Regex),
}

impl LinkFilter {
    pub fn pattern(re: &str) -> Result<Self, ConfigError> {
        Ok(Self::Pattern(Regex::new(re)?))
    }

    pub fn accepts(&self, href: &str) -> bool {
        match self {
            LinkFilter::Any => true,
            LinkFilter::Contains(needles) => needles.iter().any(|n| href.contains(n.as_str())),
            LinkFilter::Pattern(re) => re.is_match(href),
        }
    }
}

/// How a source finds its item pages.
#[derive(Debug, Clone)]
pub enum Discovery {
    /// Collect anchors matching `selector` from the listing page.
    Links {
        selector: Selector,
        filter: LinkFilter,
    },
    /// The listing URL is itself the only item.
    Single,
}

impl Discovery {
    pub fn links(selector: &str, filter: LinkFilter) -> Result<Self, ConfigError> {
        let selector = Selector::parse(selector).map_err(|e| ConfigError::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::Links { selector, filter })
    }
}

/// Resolve a `/`-rooted href against `base`; anything else passes through unchanged.
///
/// Resolution follows URL rules, so a protocol-relative `//host/path` keeps
/// its own host and takes the scheme of `base`.
///
/// # Arguments
///
/// * `href` - Raw `href` attribute value, already trimmed
/// * `base` - Origin of the source being scraped
///
/// # Returns
///
/// The absolute URL for rooted hrefs, otherwise `href` as written.
pub fn normalize_href(href: &str, base: &Url) -> String {
    if href.starts_with('/') {
        match base.join(href) {
            Ok(joined) => joined.to_string(),
            Err(_) => format!("{}{}", base.as_str().trim_end_matches('/'), href),
        }
    } else {
        href.to_string()
    }
}

/// Candidate item URLs from an already parsed listing page, in document order.
pub fn collect_links(
    doc: &Document,
    selector: &Selector,
    filter: &LinkFilter,
    base: &Url,
    dedupe: bool,
) -> Vec<String> {
    let links = doc
        .find_all(selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && filter.accepts(href))
        .map(|href| normalize_href(href, base));

    if dedupe {
        links.unique().collect()
    } else {
        links.collect()
    }
}

/// Fetch the listing page and return the item URLs it links to.
///
/// A listing fetch failure is returned, never retried.
#[instrument(level = "info", skip(fetcher, rule, base))]
pub async fn discover<F: Fetch>(
    fetcher: &F,
    listing_url: &str,
    base: &Url,
    rule: &Discovery,
    dedupe: bool,
) -> Result<Vec<String>, DiscoveryError> {
    let (selector, filter) = match rule {
        Discovery::Single => {
            info!("Single-page source; listing URL is the only item");
            return Ok(vec![listing_url.to_string()]);
        }
        Discovery::Links { selector, filter } => (selector, filter),
    };

    info!("Fetching item URLs from listing page");
    let body = fetcher.fetch(listing_url).await?;
    let doc = Document::parse(listing_url, &body);
    let urls = collect_links(&doc, selector, filter, base, dedupe);

    info!(count = urls.len(), dedupe, "Found item URLs");
    debug!(urls = ?urls, "Discovered URLs");
    Ok(urls)
}
