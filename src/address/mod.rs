//! Canadian address normalization.
//!
//! Two entry points with deliberately different failure philosophies: the
//! comma-segmented parser raises on any shape mismatch, while the
//! tagger-backed extractors answer with an empty string when a component
//! cannot be determined. Callers rely on the distinction, so the two are
//! kept separate rather than unified.

pub mod tagger;

use serde::Serialize;

use crate::error::{Result, ScraperError};

pub use tagger::{AddressTagger, RuleBasedTagger, TaggedToken, TokenCategory};

/// City and province derived from one address string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedAddress {
    pub city: String,
    pub province: String,
}

/// Parses a Yellow Pages Canada address of the shape
/// `"<street>, <city>, <province> <postal code>"`.
///
/// The province is returned as the first token of the third segment, without
/// any validation against the real code set. Fewer than three comma-separated
/// segments is a hard error.
pub fn parse_yellow_pages_ca_address(address: &str) -> Result<ParsedAddress> {
    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() < 3 {
        return Err(ScraperError::MalformedAddress(format!(
            "address doesn't look like a Yellow Pages CA address: {}",
            address
        )));
    }

    let city = parts[1].trim().to_string();
    let province = parts[2]
        .trim()
        .split_whitespace()
        .next()
        .ok_or_else(|| {
            ScraperError::MalformedAddress(format!("address has an empty province segment: {}", address))
        })?
        .to_string();

    Ok(ParsedAddress { city, province })
}

/// Municipality tokens of the address joined by single spaces, so multi-word
/// city names come back whole. Empty string when the tagger finds none.
pub fn extract_city_ca(address: &str) -> String {
    city_from_tokens(&RuleBasedTagger::new().tag(address))
}

/// Province-tagged token of the address, last one wins. Empty string when the
/// tagger finds none. Inherits the tagger's weakness of occasionally taking a
/// city for a province when the real province token is missing.
pub fn extract_province_ca(address: &str) -> String {
    province_from_tokens(&RuleBasedTagger::new().tag(address))
}

pub fn city_from_tokens(tokens: &[TaggedToken]) -> String {
    let mut city = String::new();
    for token in tokens
        .iter()
        .filter(|t| t.category == TokenCategory::Municipality)
    {
        if !city.is_empty() {
            city.push(' ');
        }
        city.push_str(&token.token);
    }
    city
}

pub fn province_from_tokens(tokens: &[TaggedToken]) -> String {
    tokens
        .iter()
        .filter(|t| t.category == TokenCategory::Province)
        .last()
        .map(|t| t.token.clone())
        .unwrap_or_default()
}
