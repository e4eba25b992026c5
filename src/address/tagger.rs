//! Heuristic address-component tagger for free-text Canadian addresses.
//!
//! Tokens are classified in a single left-to-right pass. Comma boundaries end
//! the street portion; inside a single unsegmented string the street type
//! token marks the hand-off to municipality tokens. The tagger is lenient by
//! contract: anything it cannot place is tagged `Unknown`, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Province;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    StreetNumber,
    StreetName,
    StreetType,
    StreetDirection,
    Municipality,
    Province,
    PostalCode,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub token: String,
    pub category: TokenCategory,
}

/// Capability seam for address-component classification. Any tagger that
/// emits tokens in input order can back the city/province extractors.
pub trait AddressTagger {
    fn tag(&self, address: &str) -> Vec<TaggedToken>;
}

/// Matches one chunk of a Canadian postal code, spaced ("P7E 4H4") or
/// compact ("P7E4H4").
static POSTAL_CHUNK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[A-Za-z][0-9][A-Za-z][0-9][A-Za-z][0-9]|[A-Za-z][0-9][A-Za-z]|[0-9][A-Za-z][0-9])$",
    )
    .unwrap()
});

const STREET_TYPES: &[&str] = &[
    "st", "street", "ave", "avenue", "av", "rd", "road", "blvd", "boulevard", "dr", "drive",
    "cres", "crescent", "crt", "court", "ct", "pl", "place", "ln", "lane", "way", "hwy",
    "highway", "terr", "terrace", "pkwy", "parkway", "sq", "square", "trail", "row",
];

const DIRECTIONS: &[&str] = &[
    "n", "s", "e", "w", "ne", "nw", "se", "sw", "north", "south", "east", "west",
];

fn is_street_type(token: &str) -> bool {
    let token = token.trim_end_matches('.');
    STREET_TYPES.iter().any(|t| token.eq_ignore_ascii_case(t))
}

fn is_direction(token: &str) -> bool {
    let token = token.trim_end_matches('.');
    DIRECTIONS.iter().any(|d| token.eq_ignore_ascii_case(d))
}

fn is_province_code(token: &str) -> bool {
    token.len() == 2
        && Province::ALL
            .iter()
            .any(|p| p.code().eq_ignore_ascii_case(token))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Street,
    Municipality,
    Tail,
}

fn classify_settled(token: &str, phase: &mut Phase) -> TokenCategory {
    if POSTAL_CHUNK.is_match(token) {
        *phase = Phase::Tail;
        TokenCategory::PostalCode
    } else if is_province_code(token) {
        TokenCategory::Province
    } else if *phase == Phase::Tail {
        TokenCategory::Unknown
    } else {
        TokenCategory::Municipality
    }
}

pub struct RuleBasedTagger;

impl RuleBasedTagger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressTagger for RuleBasedTagger {
    fn tag(&self, address: &str) -> Vec<TaggedToken> {
        let mut tagged = Vec::new();
        let mut phase = Phase::Street;
        let mut saw_street_name = false;
        let mut saw_street_type = false;

        for (index, segment) in address.split(',').enumerate() {
            if index > 0 && phase == Phase::Street {
                phase = Phase::Municipality;
            }
            for token in segment.split_whitespace() {
                let category = match phase {
                    Phase::Street => {
                        let leads_with_digit =
                            token.chars().next().is_some_and(|c| c.is_ascii_digit());
                        if leads_with_digit && !saw_street_name {
                            TokenCategory::StreetNumber
                        } else if is_street_type(token) && saw_street_name {
                            saw_street_type = true;
                            TokenCategory::StreetType
                        } else if is_direction(token) && saw_street_type {
                            TokenCategory::StreetDirection
                        } else if saw_street_type {
                            // first token past the street portion of an
                            // unsegmented address
                            phase = Phase::Municipality;
                            classify_settled(token, &mut phase)
                        } else {
                            saw_street_name = true;
                            TokenCategory::StreetName
                        }
                    }
                    Phase::Municipality | Phase::Tail => classify_settled(token, &mut phase),
                };
                tagged.push(TaggedToken {
                    token: token.to_string(),
                    category,
                });
            }
        }

        tagged
    }
}
