//! Extracts business listings from a Yellow Pages Canada search-results page.
//!
//! The page structure is matched strictly: a listing block missing its name
//! link or phone span means the site markup changed, and the whole extraction
//! fails rather than returning partial results.

pub mod redirect;

use scraper::{Html, Selector};
use serde::Serialize;

use crate::error::{Result, ScraperError};

pub use redirect::unwrap_redirect_url;

/// One business scraped from a search-results page.
///
/// `website_url` is the empty string when the listing carries no website
/// action element at all; that sentinel is distinct from the hard error
/// raised when a website link is present but has no redirect marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessListing {
    pub business_name: String,
    pub phone_number: String,
    pub website_url: String,
}

/// Parses a full search-results page into listings, in document order.
pub fn extract_listings(html: &str) -> Result<Vec<BusinessListing>> {
    let document = Html::parse_document(html);

    let listing_selector = Selector::parse(".listing_right_section").unwrap();
    let name_selector = Selector::parse("a.listing__name--link").unwrap();
    let phone_selector = Selector::parse("span[appcallback_target_phone]").unwrap();
    let website_selector = Selector::parse("li.mlr__item--website").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let mut listings = Vec::new();
    for block in document.select(&listing_selector) {
        let business_name = block
            .select(&name_selector)
            .next()
            .ok_or_else(|| {
                ScraperError::StructuralMismatch("listing name link not found".to_string())
            })?
            .text()
            .collect::<String>();

        let phone_number = block
            .select(&phone_selector)
            .next()
            .ok_or_else(|| {
                ScraperError::StructuralMismatch("phone callback span not found".to_string())
            })?
            .text()
            .collect::<String>();

        let website_url = match block.select(&website_selector).next() {
            Some(website_button) => {
                let href = website_button
                    .select(&anchor_selector)
                    .next()
                    .ok_or_else(|| {
                        ScraperError::StructuralMismatch(
                            "website action element has no link".to_string(),
                        )
                    })?
                    .value()
                    .attr("href");
                unwrap_redirect_url(href)?.unwrap_or_default()
            }
            None => String::new(),
        };

        listings.push(BusinessListing {
            business_name,
            phone_number,
            website_url,
        });
    }

    Ok(listings)
}
