//! CNN article scraper.
//!
//! Section pages link to articles with a mix of relative and absolute URLs.
//! Relative links are resolved against `https://www.cnn.com`. Only links that
//! mention `/articles/` or `cnn.com` are kept.

use super::{Interaction, Source, origin};
use crate::chain::{Css, PageUrl, SelectorChain, Take};
use crate::discovery::{Discovery, LinkFilter};
use crate::error::ConfigError;
use crate::schema::{Field, Schema};
use crate::throttle::Throttle;

pub const NAME: &str = "cnn";
pub const BASE_ORIGIN: &str = "https://www.cnn.com";
pub const DEFAULT_OUTPUT: &str = "cnn_news.csv";

fn schema() -> Result<Schema, ConfigError> {
    Schema::new(
        NAME,
        vec![
            Field::new(
                "title",
                "No Title Found",
                SelectorChain::new().or(Css::text("h1")?),
            ),
            Field::new(
                "date",
                "No Date Found",
                SelectorChain::new()
                    .or(Css::attr(r#"meta[name="pubdate"]"#, "content")?)
                    .or(Css::attr(r#"meta[property="article:published_time"]"#, "content")?),
            ),
            Field::new(
                "summary",
                "No Summary Available",
                SelectorChain::new().or(Css::attr(r#"meta[name="description"]"#, "content")?),
            ),
            Field::new(
                "content",
                "No Content Found",
                SelectorChain::new()
                    .or(Css::new("div.zn-body__paragraph", Take::All(" ".to_string()))?)
                    .or(Css::new("p.paragraph", Take::All(" ".to_string()))?),
            ),
            Field::new(
                "article_url",
                "No URL",
                SelectorChain::new().or(PageUrl),
            ),
        ],
        "title",
    )
}

pub fn source() -> Result<Source, ConfigError> {
    Ok(Source {
        name: NAME.to_string(),
        description: "CNN section page -> articles".to_string(),
        base_origin: origin(BASE_ORIGIN)?,
        discovery: Discovery::links(
            "a[href]",
            LinkFilter::Contains(vec!["/articles/".to_string(), "cnn.com".to_string()]),
        )?,
        schema: schema()?,
        throttle: Throttle::new(1.0, 3.0)?,
        default_output: DEFAULT_OUTPUT.to_string(),
        interaction: Interaction::Menu,
    })
}
