//! Source definitions: one hand-authored schema and discovery rule per page type.
//!
//! # Built-in sources
//!
//! | Source | Module | Discovery | After the run |
//! |--------|--------|-----------|---------------|
//! | Amazon search results | [`amazon`] | `a.a-link-normal.s-no-outline` anchors | save |
//! | CNN section pages | [`cnn`] | `a[href]`, kept if it mentions `/articles/` or `cnn.com` | menu |
//! | Cricbuzz live commentary | [`cricbuzz`] | the page itself | save |
//! | ESPNcricinfo live scores | [`espncricinfo`] | the page itself | save |
//!
//! More sources can be loaded from a YAML file, see [`crate::config`].

pub mod amazon;
pub mod cnn;
pub mod cricbuzz;
pub mod espncricinfo;

use crate::discovery::Discovery;
use crate::error::ConfigError;
use crate::schema::Schema;
use crate::throttle::Throttle;
use serde::Deserialize;
use std::fmt;
use url::Url;

/// What happens once the batch has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Write the finalized table straight to the output path.
    #[default]
    Save,
    /// Offer an interactive save / display / exit menu.
    Menu,
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interaction::Save => write!(f, "save"),
            Interaction::Menu => write!(f, "menu"),
        }
    }
}

/// Everything needed to scrape one kind of listing.
#[derive(Debug)]
pub struct Source {
    pub name: String,
    pub description: String,
    pub base_origin: Url,
    pub discovery: Discovery,
    pub schema: Schema,
    pub throttle: Throttle,
    pub default_output: String,
    pub interaction: Interaction,
}

pub(crate) fn origin(s: &str) -> Result<Url, ConfigError> {
    Url::parse(s).map_err(|source| ConfigError::BaseOrigin {
        origin: s.to_string(),
        source,
    })
}

/// All sources compiled into the binary.
pub fn builtin() -> Result<Vec<Source>, ConfigError> {
    Ok(vec![
        amazon::source()?,
        cnn::source()?,
        cricbuzz::source()?,
        espncricinfo::source()?,
    ])
}

/// Pick a source by name (case-insensitive).
pub fn select(sources: Vec<Source>, name: &str) -> Result<Source, ConfigError> {
    sources
        .into_iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownSource(name.to_string()))
}
