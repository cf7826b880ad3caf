//! Command-line interface definitions.
//!
//! Source selection and the sources file can also come from environment
//! variables, which is handy for cron-style runs.

use crate::fetch::{DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT};
use clap::Parser;
use std::path::PathBuf;

/// Scrape the items linked from a listing page into a CSV table.
///
/// # Examples
///
/// ```sh
/// # Prompt for an Amazon search URL, save to amazon_scraped_data.csv
/// tabscrape
///
/// # CNN section page, interactive menu after the run
/// tabscrape --source cnn https://www.cnn.com/world
///
/// # Custom source from a YAML file, tab-separated output
/// tabscrape --sources-file authors.yaml --source authors --delimiter $'\t' -o authors.tsv https://quotes.toscrape.com
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing page URL; prompted for when omitted. Must start with https://
    pub url: Option<String>,

    /// Source definition to use (see --list-sources)
    #[arg(short, long, env = "TABSCRAPE_SOURCE", default_value = "amazon")]
    pub source: String,

    /// YAML file with additional source definitions
    #[arg(long, env = "TABSCRAPE_SOURCES")]
    pub sources_file: Option<PathBuf>,

    /// Output file; defaults to the source's own file name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show the save / display / exit menu after the run, whatever the source says
    #[arg(long)]
    pub menu: bool,

    /// Scrape each discovered URL only once
    #[arg(long)]
    pub dedupe: bool,

    /// Field delimiter for the output file (single ASCII character)
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Minimum delay before each item request, in seconds
    #[arg(long, requires = "max_delay")]
    pub min_delay: Option<f64>,

    /// Maximum delay before each item request, in seconds
    #[arg(long, requires = "min_delay")]
    pub max_delay: Option<f64>,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Accept-Language header sent with every request
    #[arg(long, default_value = DEFAULT_ACCEPT_LANGUAGE)]
    pub accept_language: String,

    /// Print the available sources and exit
    #[arg(long)]
    pub list_sources: bool,
}
