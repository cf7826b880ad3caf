//! Sequential batch runner.
//!
//! Items move through `Pending -> Fetching -> (Extracted | Failed)` one at a
//! time, in discovery order. A failed item still contributes a row: every
//! column gets [`ERROR_MARKER`](crate::models::ERROR_MARKER), so the number of
//! rows always equals the number of items attempted.

use crate::discovery::normalize_href;
use crate::document::Document;
use crate::error::ItemFailure;
use crate::fetch::Fetch;
use crate::models::{Accumulator, Record};
use crate::schema::Schema;
use crate::throttle::Throttle;
use futures::stream::{self, StreamExt};
use std::fmt;
use tracing::{error, info, instrument, warn};
use url::Url;

/// Terminal state of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Extracted,
    Failed,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemState::Extracted => write!(f, "extracted"),
            ItemState::Failed => write!(f, "failed"),
        }
    }
}

/// Drives fetch, throttle and extraction for a list of item URLs.
pub struct Runner<'a, F> {
    fetcher: &'a F,
    schema: &'a Schema,
    throttle: Throttle,
    base: &'a Url,
}

impl<'a, F: Fetch> Runner<'a, F> {
    pub fn new(fetcher: &'a F, schema: &'a Schema, throttle: Throttle, base: &'a Url) -> Self {
        Self {
            fetcher,
            schema,
            throttle,
            base,
        }
    }

    /// Process every URL and return the filled accumulator.
    ///
    /// An empty input returns an empty accumulator straight away.
    #[instrument(level = "info", skip_all, fields(items = urls.len()))]
    pub async fn run(&self, urls: &[String]) -> Accumulator {
        let acc = Accumulator::new(self.schema);
        if urls.is_empty() {
            warn!("No item URLs to scrape; check the listing URL");
            return acc;
        }

        let total = urls.len();
        info!(total, "Starting to scrape items");

        let (acc, failed) = stream::iter(urls.iter().enumerate())
            .fold((acc, 0usize), move |(mut acc, mut failed), (i, url)| async move {
                info!(item = i + 1, total, %url, "Processing item");
                if self.step(&mut acc, url).await == ItemState::Failed {
                    failed += 1;
                }
                (acc, failed)
            })
            .await;

        info!(
            total,
            extracted = total - failed,
            failed,
            "Finished scraping items"
        );
        acc
    }

    /// Run one item to completion and append its row.
    async fn step(&self, acc: &mut Accumulator, url: &str) -> ItemState {
        match self.process(url).await {
            Ok(record) => match acc.push(record) {
                Ok(()) => ItemState::Extracted,
                Err(e) => {
                    error!(%url, error = %e, "Record does not fit the schema; recording error row");
                    acc.push_error();
                    ItemState::Failed
                }
            },
            Err(e) => {
                error!(%url, error = %e, "Item failed; recording error row");
                acc.push_error();
                ItemState::Failed
            }
        }
    }

    async fn process(&self, url: &str) -> Result<Record, ItemFailure> {
        let url = normalize_href(url, self.base);
        self.throttle.wait().await;
        let body = self.fetcher.fetch(&url).await?;
        let doc = Document::parse(&url, &body);
        Ok(self.schema.extract(&doc)?)
    }
}
