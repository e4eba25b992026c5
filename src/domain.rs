use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ScraperError;

/// Two-letter Canadian province/territory codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Province {
    AB,
    BC,
    MB,
    NB,
    NL,
    NT,
    NS,
    NU,
    ON,
    PE,
    QC,
    SK,
    YT,
}

impl Province {
    pub const ALL: [Province; 13] = [
        Province::AB,
        Province::BC,
        Province::MB,
        Province::NB,
        Province::NL,
        Province::NT,
        Province::NS,
        Province::NU,
        Province::ON,
        Province::PE,
        Province::QC,
        Province::SK,
        Province::YT,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Province::AB => "AB",
            Province::BC => "BC",
            Province::MB => "MB",
            Province::NB => "NB",
            Province::NL => "NL",
            Province::NT => "NT",
            Province::NS => "NS",
            Province::NU => "NU",
            Province::ON => "ON",
            Province::PE => "PE",
            Province::QC => "QC",
            Province::SK => "SK",
            Province::YT => "YT",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Province::AB => "Alberta",
            Province::BC => "British Columbia",
            Province::MB => "Manitoba",
            Province::NB => "New Brunswick",
            Province::NL => "Newfoundland and Labrador",
            Province::NT => "Northwest Territories",
            Province::NS => "Nova Scotia",
            Province::NU => "Nunavut",
            Province::ON => "Ontario",
            Province::PE => "Prince Edward Island",
            Province::QC => "Quebec",
            Province::SK => "Saskatchewan",
            Province::YT => "Yukon",
        }
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Province {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Province::ALL
            .iter()
            .find(|p| p.code().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ScraperError::MalformedAddress(format!("unknown province code: {}", s)))
    }
}

/// Whether the business behind a prospect still appears to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistenceStatus {
    Exists,
    DoesNotExist,
    #[default]
    Unknown,
}

/// A business to cold-call, as imported from a directory export or scraped page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prospect {
    pub id: Uuid,
    pub business_name: Option<String>,
    pub industry: String,
    /// As displayed on the directory page; dedupe key, never normalized.
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub province: Option<Province>,
    pub street_address: Option<String>,
    pub website_url: Option<String>,
    pub yellow_pages_link: Option<String>,
    pub existence_status: ExistenceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prospect {
    pub fn new(industry: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            business_name: None,
            industry: industry.to_string(),
            phone_number: None,
            city: None,
            province: None,
            street_address: None,
            website_url: None,
            yellow_pages_link: None,
            existence_status: ExistenceStatus::Unknown,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickUpStatus {
    Yes,
    #[default]
    No,
    Ivr,
    Voicemail,
    NotConnecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    No,
    Yes,
    Meeting,
}

/// One logged call attempt against a prospect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: Uuid,
    pub prospect_id: Uuid,
    pub date: DateTime<Utc>,
    pub pick_up_status: PickUpStatus,
    pub had_owner_conversation: bool,
    pub outcome: Option<CallOutcome>,
    pub my_area_code_city: Option<String>,
    pub product_selling: Option<String>,
    pub opening: Option<String>,
    pub objection: Option<String>,
    pub note: Option<String>,
}

impl CallRecord {
    pub fn new(prospect_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            prospect_id,
            date: Utc::now(),
            pick_up_status: PickUpStatus::default(),
            had_owner_conversation: false,
            outcome: None,
            my_area_code_city: None,
            product_selling: None,
            opening: None,
            objection: None,
            note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn province_parses_case_insensitively() {
        assert_eq!("BC".parse::<Province>().unwrap(), Province::BC);
        assert_eq!("on".parse::<Province>().unwrap(), Province::ON);
    }

    #[test]
    fn unknown_province_code_is_an_error() {
        assert!("XX".parse::<Province>().is_err());
        assert!("Ontario".parse::<Province>().is_err());
    }

    #[test]
    fn province_serializes_as_its_code() {
        let json = serde_json::to_string(&Province::QC).unwrap();
        assert_eq!(json, "\"QC\"");
    }
}
