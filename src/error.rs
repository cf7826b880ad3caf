//! Error types for each stage of the scrape pipeline.
//!
//! Failures are split by where they are handled:
//! - [`FetchError`] and [`ExtractError`] are per-item and get folded into an
//!   [`ItemFailure`] by the batch runner, which records an error row and moves on.
//! - [`DiscoveryError`] ends a run before any item is fetched.
//! - [`ValidationError`] and [`ConfigError`] are raised before any network activity.
//! - [`SinkError`] is raised while writing the output table.

use thiserror::Error;

/// Transport failure for a single request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A strategy failed while reading a parsed document.
#[derive(Debug, Error)]
#[error("field `{field}`: {reason}")]
pub struct ExtractError {
    pub field: String,
    pub reason: String,
}

/// Anything that can go wrong between fetching one item and producing its record.
#[derive(Debug, Error)]
pub enum ItemFailure {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// The listing page could not be turned into a list of item URLs.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("could not fetch listing page: {0}")]
    Fetch(#[from] FetchError),
}

/// Rejected user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid URL `{0}`: it must start with https://")]
    NotHttps(String),

    #[error("invalid delimiter `{0}`: it must be a single ASCII character")]
    Delimiter(char),
}

/// A source definition that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CSS selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid base origin `{origin}`: {source}")]
    BaseOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid delay range {min}..={max} seconds")]
    Delay { min: f64, max: f64 },

    #[error("source `{source_name}`: {reason}")]
    Schema { source_name: String, reason: String },

    #[error("unknown source `{0}`")]
    UnknownSource(String),

    #[error("could not read sources file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse sources file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// The output table could not be written.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("writing {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A record whose field names do not line up with the accumulator's columns.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("record fields {got:?} do not match schema columns {expected:?}")]
pub struct ShapeError {
    pub expected: Vec<String>,
    pub got: Vec<String>,
}
