//! Amazon search-results scraper.
//!
//! Product links come from the result cards on a search page; each product
//! page is then read for price, rating, stock and so on. Several fields have
//! more than one known location (the price block moved between page layouts),
//! so their chains list the alternatives newest-first.

use super::{Interaction, Source, origin};
use crate::chain::{Css, SelectorChain, Take};
use crate::discovery::{Discovery, LinkFilter};
use crate::error::ConfigError;
use crate::schema::{Field, Schema};
use crate::throttle::Throttle;

pub const NAME: &str = "amazon";
pub const BASE_ORIGIN: &str = "https://www.amazon.com";
pub const DEFAULT_OUTPUT: &str = "amazon_scraped_data.csv";

fn schema() -> Result<Schema, ConfigError> {
    Schema::new(
        NAME,
        vec![
            Field::new(
                "product_name",
                "No Product Name Found",
                SelectorChain::new().or(Css::text("span#productTitle")?),
            ),
            Field::new(
                "product_price",
                "Price Unavailable",
                SelectorChain::new()
                    .or(Css::text("span#priceblock_ourprice")?)
                    .or(Css::text("span#priceblock_dealprice")?)
                    .or(Css::text("span.a-price-whole")?),
            ),
            Field::new(
                "product_rating",
                "No Rating Found",
                SelectorChain::new().or(Css::text("span.a-icon-alt")?),
            ),
            Field::new(
                "review_count",
                "No Reviews Found",
                SelectorChain::new().or(Css::text("span#acrCustomerReviewText")?),
            ),
            Field::new(
                "stock_status",
                "Stock Status Unknown",
                SelectorChain::new().or(Css::text("div#availability span")?),
            ),
            Field::new(
                "description",
                "No Description Available",
                SelectorChain::new()
                    .or(Css::new("div#productDescription", Take::Joined(" ".to_string()))?),
            ),
            Field::new(
                "image_link",
                "No Image Available",
                SelectorChain::new().or(Css::attr("img#landingImage", "src")?),
            ),
            Field::new(
                "manufacturer",
                "No Brand Information",
                SelectorChain::new().or(Css::text("a#bylineInfo")?),
            ),
        ],
        "product_name",
    )
}

pub fn source() -> Result<Source, ConfigError> {
    Ok(Source {
        name: NAME.to_string(),
        description: "Amazon search results -> product details".to_string(),
        base_origin: origin(BASE_ORIGIN)?,
        discovery: Discovery::links("a.a-link-normal.s-no-outline", LinkFilter::Any)?,
        schema: schema()?,
        throttle: Throttle::new(2.0, 5.0)?,
        default_output: DEFAULT_OUTPUT.to_string(),
        interaction: Interaction::Save,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    const PRODUCT: &str = r#"
        <html><body>
            <span id="productTitle">
                Stainless Steel Kettle, 1.7L
            </span>
            <span id="priceblock_ourprice"></span>
            <span class="a-price-whole">34.</span>
            <span class="a-icon-alt">4.6 out of 5 stars</span>
            <div id="availability"><span> In Stock </span></div>
            <div id="productDescription"><p>Boils fast.</p><p>Auto shut-off.</p></div>
            <img id="landingImage" src="https://m.media-amazon.com/images/I/k.jpg">
            <a id="bylineInfo">Visit the Acme Store</a>
        </body></html>
    "#;

    #[test]
    fn test_product_page() {
        let src = source().unwrap();
        let doc = Document::parse("https://www.amazon.com/dp/B0TEST", PRODUCT.as_bytes());
        let r = src.schema.extract(&doc).unwrap();

        assert_eq!(r.get("product_name"), Some("Stainless Steel Kettle, 1.7L"));
        assert_eq!(r.get("product_price"), Some("34."));
        assert_eq!(r.get("product_rating"), Some("4.6 out of 5 stars"));
        assert_eq!(r.get("review_count"), Some("No Reviews Found"));
        assert_eq!(r.get("stock_status"), Some("In Stock"));
        assert_eq!(r.get("description"), Some("Boils fast. Auto shut-off."));
        assert_eq!(
            r.get("image_link"),
            Some("https://m.media-amazon.com/images/I/k.jpg")
        );
        assert_eq!(r.get("manufacturer"), Some("Visit the Acme Store"));
    }

    #[test]
    fn test_blank_page_is_all_sentinels() {
        let src = source().unwrap();
        let doc = Document::parse("https://www.amazon.com/dp/B0TEST", b"<html></html>");
        let r = src.schema.extract(&doc).unwrap();

        assert_eq!(r.get("product_name"), Some("No Product Name Found"));
        assert_eq!(r.get("product_price"), Some("Price Unavailable"));
        assert_eq!(r.get("product_rating"), Some("No Rating Found"));
        assert_eq!(r.get("image_link"), Some("No Image Available"));
    }

    #[test]
    fn test_defaults() {
        let src = source().unwrap();
        assert_eq!(src.schema.primary(), "product_name");
        assert_eq!(src.throttle, Throttle::new(2.0, 5.0).unwrap());
        assert_eq!(src.default_output, DEFAULT_OUTPUT);
    }
}
