//! Discovery followed by the batch run, for one source and one listing URL.

use crate::discovery::discover;
use crate::error::DiscoveryError;
use crate::fetch::Fetch;
use crate::models::Accumulator;
use crate::runner::Runner;
use crate::scrapers::Source;
use crate::throttle::Throttle;
use tracing::{info, instrument};

/// Per-run knobs that are not part of a source definition.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Drop repeated item URLs, keeping the first.
    pub dedupe: bool,
    /// Delay range to use instead of the source's own.
    pub throttle: Option<Throttle>,
}

/// Discover items on `listing_url` and scrape each one.
///
/// Only a discovery failure is returned as an error; item failures end up as
/// error rows in the accumulator.
#[instrument(level = "info", skip(fetcher, source, options), fields(source = %source.name))]
pub async fn scrape<F: Fetch>(
    fetcher: &F,
    source: &Source,
    listing_url: &str,
    options: &RunOptions,
) -> Result<Accumulator, DiscoveryError> {
    let urls = discover(
        fetcher,
        listing_url,
        &source.base_origin,
        &source.discovery,
        options.dedupe,
    )
    .await?;

    let throttle = options.throttle.unwrap_or(source.throttle);
    info!(
        min_secs = throttle.min_secs(),
        max_secs = throttle.max_secs(),
        "Using delay range"
    );

    let acc = Runner::new(fetcher, &source.schema, throttle, &source.base_origin)
        .run(&urls)
        .await;
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{Css, SelectorChain};
    use crate::discovery::{Discovery, LinkFilter};
    use crate::fetch::testing::StaticFetcher;
    use crate::models::ERROR_MARKER;
    use crate::schema::{Field, Schema};
    use crate::scrapers::Interaction;
    use url::Url;

    fn news_source() -> Source {
        Source {
            name: "news".to_string(),
            description: String::new(),
            base_origin: Url::parse("https://news.test").unwrap(),
            discovery: Discovery::links(
                "a[href]",
                LinkFilter::Contains(vec!["/articles/".to_string()]),
            )
            .unwrap(),
            schema: Schema::new(
                "news",
                vec![
                    Field::new(
                        "title",
                        "No Title Found",
                        SelectorChain::new().or(Css::text("h1").unwrap()),
                    ),
                    Field::new(
                        "summary",
                        "No Summary Available",
                        SelectorChain::new()
                            .or(Css::attr(r#"meta[name="description"]"#, "content").unwrap()),
                    ),
                ],
                "title",
            )
            .unwrap(),
            throttle: Throttle::new(5.0, 10.0).unwrap(),
            default_output: "news.csv".to_string(),
            interaction: Interaction::Save,
        }
    }

    fn options() -> RunOptions {
        RunOptions {
            dedupe: false,
            throttle: Some(Throttle::none()),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_filtered_failed_and_extracted() {
        let listing = r#"
            <a href="/articles/down">Down</a>
            <a href="/about">About</a>
            <a href="https://news.test/articles/up">Up</a>
        "#;
        let fetcher = StaticFetcher::new()
            .page("https://news.test/", listing)
            .failing("https://news.test/articles/down", 502)
            .page(
                "https://news.test/articles/up",
                r#"<meta name="description" content="All good"><h1>Up and running</h1>"#,
            );

        let acc = scrape(&fetcher, &news_source(), "https://news.test/", &options())
            .await
            .unwrap();

        assert_eq!(acc.len(), 2);
        assert!(!fetcher.requests().iter().any(|u| u.contains("/about")));

        let table = acc.finalize();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec![ERROR_MARKER, ERROR_MARKER]);
        assert_eq!(table.rows[1], vec!["Up and running", "All good"]);
    }

    #[tokio::test]
    async fn test_discovery_failure_is_returned() {
        let fetcher = StaticFetcher::new();
        let result = scrape(&fetcher, &news_source(), "https://news.test/", &options()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_listing_gives_empty_accumulator() {
        let fetcher = StaticFetcher::new().page("https://news.test/", "<p>nothing</p>");
        let acc = scrape(&fetcher, &news_source(), "https://news.test/", &options())
            .await
            .unwrap();
        assert!(acc.is_empty());
        assert_eq!(fetcher.requests(), vec!["https://news.test/"]);
    }

    #[tokio::test]
    async fn test_dedupe_option() {
        let listing = r#"<a href="/articles/1">a</a><a href="/articles/1">b</a>"#;
        let fetcher = StaticFetcher::new()
            .page("https://news.test/", listing)
            .page("https://news.test/articles/1", "<h1>One</h1>");

        let opts = RunOptions {
            dedupe: true,
            ..options()
        };
        let acc = scrape(&fetcher, &news_source(), "https://news.test/", &opts)
            .await
            .unwrap();
        assert_eq!(acc.len(), 1);

        let acc = scrape(&fetcher, &news_source(), "https://news.test/", &options())
            .await
            .unwrap();
        assert_eq!(acc.len(), 2);
    }
}
