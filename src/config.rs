//! Loading extra sources from a YAML file.
//!
//! The file holds a list of sources in the same shape as the built-ins:
//!
//! ```yaml
//! sources:
//!   - name: authors
//!     base_origin: https://quotes.toscrape.com
//!     links: "div.quote span a"           # omit for a single-page source
//!     contains: ["/author/"]              # or: pattern: "^/author/"
//!     delay: { min_secs: 1.0, max_secs: 2.0 }
//!     output: authors.csv
//!     after_run: save                     # or: menu
//!     primary: name
//!     fields:
//!       - name: name
//!         sentinel: No Name Found
//!         chain:
//!           - css: h3.author-title
//!       - name: born
//!         sentinel: Unknown
//!         chain:
//!           - css: span.author-born-date
//!       - name: url
//!         sentinel: ""
//!         chain:
//!           - page_url: true
//! ```
//!
//! Discovered hrefs must be absolute or start with `/`; other relative hrefs
//! are kept as written and fail to fetch.
//!
//! Every selector, pattern and delay range is validated up front, so a bad
//! file fails before any request is made.

use crate::chain::{Css, PageUrl, SelectorChain, Strategy, Take};
use crate::discovery::{Discovery, LinkFilter};
use crate::error::ConfigError;
use crate::schema::{Field, Schema};
use crate::scrapers::{Interaction, Source, origin};
use crate::throttle::Throttle;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesFile {
    pub sources: Vec<SourceDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_origin: String,
    pub links: Option<String>,
    #[serde(default)]
    pub contains: Vec<String>,
    pub pattern: Option<String>,
    #[serde(default)]
    pub delay: DelayDef,
    pub output: Option<String>,
    #[serde(default)]
    pub after_run: Interaction,
    pub primary: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayDef {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl Default for DelayDef {
    fn default() -> Self {
        Self {
            min_secs: 1.0,
            max_secs: 3.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,
    pub sentinel: String,
    pub chain: Vec<StrategyDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyDef {
    pub css: Option<String>,
    pub attr: Option<String>,
    pub join: Option<String>,
    pub all: Option<String>,
    #[serde(default)]
    pub page_url: bool,
}

impl StrategyDef {
    fn build(self, owner: &str, field: &str) -> Result<Box<dyn Strategy>, ConfigError> {
        let invalid = |reason: &str| ConfigError::Schema {
            source_name: owner.to_string(),
            reason: format!("field `{field}`: {reason}"),
        };

        if self.page_url {
            if self.css.is_some() || self.attr.is_some() || self.join.is_some() || self.all.is_some() {
                return Err(invalid("page_url cannot be combined with css/attr/join/all"));
            }
            return Ok(Box::new(PageUrl));
        }

        let css = self.css.ok_or_else(|| invalid("strategy needs `css` or `page_url: true`"))?;
        let take = match (self.attr, self.join, self.all) {
            (None, None, None) => Take::Text,
            (Some(name), None, None) => Take::Attr(name),
            (None, Some(sep), None) => Take::Joined(sep),
            (None, None, Some(sep)) => Take::All(sep),
            _ => return Err(invalid("use at most one of attr/join/all")),
        };
        Ok(Box::new(Css::new(&css, take)?))
    }
}

impl SourceDef {
    /// Validate and compile into a runnable [`Source`].
    pub fn into_source(self) -> Result<Source, ConfigError> {
        let name = self.name;

        let discovery = match self.links {
            None => Discovery::Single,
            Some(selector) => {
                let filter = match (self.pattern, self.contains.is_empty()) {
                    (Some(_), false) => {
                        return Err(ConfigError::Schema {
                            source_name: name,
                            reason: "use either `contains` or `pattern`, not both".to_string(),
                        });
                    }
                    (Some(re), true) => LinkFilter::pattern(&re)?,
                    (None, false) => LinkFilter::Contains(self.contains),
                    (None, true) => LinkFilter::Any,
                };
                Discovery::links(&selector, filter)?
            }
        };

        let mut fields = Vec::with_capacity(self.fields.len());
        for def in self.fields {
            let mut chain = SelectorChain::new();
            for step in def.chain {
                chain.push(step.build(&name, &def.name)?);
            }
            fields.push(Field::new(&def.name, &def.sentinel, chain));
        }
        let schema = Schema::new(&name, fields, &self.primary)?;

        Ok(Source {
            default_output: self.output.unwrap_or_else(|| format!("{name}.csv")),
            description: self.description,
            base_origin: origin(&self.base_origin)?,
            discovery,
            schema,
            throttle: Throttle::new(self.delay.min_secs, self.delay.max_secs)?,
            interaction: self.after_run,
            name,
        })
    }
}

/// Parse sources from YAML text.
pub fn parse_sources(text: &str) -> Result<Vec<Source>, ConfigError> {
    let file: SourcesFile = serde_yaml::from_str(text)?;
    file.sources.into_iter().map(SourceDef::into_source).collect()
}

/// Read and parse a sources file.
pub fn load_sources(path: &Path) -> Result<Vec<Source>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let sources = parse_sources(&text)?;
    info!(path = %path.display(), count = sources.len(), "Loaded sources file");
    Ok(sources)
}
