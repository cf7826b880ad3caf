//! # tabscrape
//!
//! Scrapes the item pages linked from a listing page into a flat CSV table.
//!
//! ## Usage
//!
//! ```sh
//! tabscrape --source amazon "https://www.amazon.com/s?k=kettle"
//! ```
//!
//! ## Architecture
//!
//! The run is a single sequential pipeline:
//! 1. **Discovery**: collect item URLs from the listing page
//! 2. **Batch run**: for each item, wait a random delay, fetch, and extract every
//!    schema field through its fallback selector chain
//! 3. **Accumulate**: append a record per item, or an all-`Error` row on failure
//! 4. **Output**: drop rows without a primary value and write CSV, or hand the
//!    results to the interactive menu

use clap::Parser;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod chain;
mod cli;
mod config;
mod discovery;
mod document;
mod error;
mod fetch;
mod menu;
mod models;
mod outputs;
mod pipeline;
mod runner;
mod schema;
mod scrapers;
mod throttle;
mod utils;

use cli::Cli;
use fetch::{HttpFetcher, RequestHeaders};
use outputs::delimited;
use pipeline::RunOptions;
use scrapers::{Interaction, Source};
use throttle::Throttle;
use utils::{delimiter_byte, validate_listing_url};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Sources ----
    let mut sources = scrapers::builtin()?;
    if let Some(path) = &args.sources_file {
        sources.extend(config::load_sources(path)?);
    }
    if args.list_sources {
        print_sources(&sources);
        return Ok(());
    }
    let source = scrapers::select(sources, &args.source)?;
    info!(source = %source.name, primary = source.schema.primary(), "Selected source");

    // ---- Input validation (before any network activity) ----
    let delimiter = delimiter_byte(args.delimiter).unwrap_or_else(|e| exit_invalid(&e));
    let throttle = match (args.min_delay, args.max_delay) {
        (Some(min), Some(max)) => Some(Throttle::new(min, max)?),
        _ => None,
    };

    let raw_url = match &args.url {
        Some(url) => url.clone(),
        None => {
            let message = format!("Enter the {} listing page URL to scrape: ", source.name);
            menu::prompt(&mut io::stdin().lock(), &mut io::stdout(), &message)?.unwrap_or_default()
        }
    };
    let listing_url = validate_listing_url(&raw_url)
        .unwrap_or_else(|e| exit_invalid(&e))
        .to_string();

    // ---- Scrape ----
    let headers = RequestHeaders {
        user_agent: args.user_agent.clone(),
        accept_language: args.accept_language.clone(),
    };
    let fetcher = HttpFetcher::new(&headers, Duration::from_secs(args.timeout_secs))?;
    let options = RunOptions {
        dedupe: args.dedupe,
        throttle,
    };

    let acc = match pipeline::scrape(&fetcher, &source, &listing_url, &options).await {
        Ok(acc) => acc,
        Err(e) => {
            error!(url = %listing_url, error = %e, "Discovery failed; nothing to scrape");
            return Ok(());
        }
    };
    if acc.is_empty() {
        warn!("No records collected; nothing to save");
        return Ok(());
    }

    // ---- Output ----
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&source.default_output));
    let interaction = if args.menu {
        Interaction::Menu
    } else {
        source.interaction
    };
    info!(%interaction, output = %output.display(), "Run finished");

    match interaction {
        Interaction::Save => {
            let table = acc.finalize();
            info!(
                kept = table.len(),
                dropped = acc.len() - table.len(),
                primary = source.schema.primary(),
                "Finalized table"
            );
            delimited::write_table(&table, &output, delimiter).await?;
            info!(path = %output.display(), "Data saved");
        }
        Interaction::Menu => {
            let default_output = output.display().to_string();
            menu::run(
                &mut io::stdin().lock(),
                &mut io::stdout(),
                &acc,
                &default_output,
                delimiter,
            )
            .await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

fn print_sources(sources: &[Source]) {
    for s in sources {
        println!(
            "{:<12} {} (fields: {}; output: {})",
            s.name,
            s.description,
            s.schema.names().join(", "),
            s.default_output
        );
    }
}

fn exit_invalid(e: &error::ValidationError) -> ! {
    eprintln!("{e}. Exiting.");
    std::process::exit(1);
}
