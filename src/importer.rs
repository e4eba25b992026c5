//! Bulk prospect import from a Yellow Pages Canada CSV export.
//!
//! Header validation is strict and happens before any row is touched. Row
//! failures are skipped and reported rather than aborting the batch, so one
//! bad export row does not cost a whole import. Duplicate phone numbers
//! within the file keep the first row.

use std::collections::HashSet;
use std::io::Read;

use serde::Serialize;
use tracing::{info, warn};

use crate::address::{extract_city_ca, extract_province_ca};
use crate::domain::{Prospect, Province};
use crate::error::{Result, ScraperError};
use crate::extractor::unwrap_redirect_url;
use crate::storage::{Storage, UpsertOutcome};

pub const REQUIRED_COLUMNS: [&str; 5] = ["Name", "Website", "Phone", "Address", "Link"];

#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub updated: usize,
    pub duplicate_rows: usize,
    pub row_errors: Vec<RowError>,
}

struct ColumnIndexes {
    name: usize,
    website: usize,
    phone: usize,
    address: usize,
    link: usize,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<ColumnIndexes> {
    let find = |column: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ScraperError::Import(format!("missing required column '{}'", column)))
    };

    Ok(ColumnIndexes {
        name: find("Name")?,
        website: find("Website")?,
        phone: find("Phone")?,
        address: find("Address")?,
        link: find("Link")?,
    })
}

fn non_empty(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prospect_from_row(
    record: &csv::StringRecord,
    columns: &ColumnIndexes,
    industry: &str,
) -> Result<Prospect> {
    let mut prospect = Prospect::new(industry);
    prospect.business_name = record.get(columns.name).and_then(non_empty);
    prospect.phone_number = record.get(columns.phone).and_then(non_empty);
    prospect.yellow_pages_link = record.get(columns.link).and_then(non_empty);

    if let Some(website) = record.get(columns.website).and_then(non_empty) {
        prospect.website_url = unwrap_redirect_url(Some(&website))?;
    }

    if let Some(address) = record.get(columns.address).and_then(non_empty) {
        let city = extract_city_ca(&address);
        if !city.is_empty() {
            prospect.city = Some(city);
        }
        // Whatever token the tagger produced; only a real code is kept.
        prospect.province = extract_province_ca(&address).parse::<Province>().ok();
        prospect.street_address = Some(address);
    }

    Ok(prospect)
}

/// Reads a directory CSV export and upserts one prospect per usable row.
pub async fn import_prospects_csv(
    reader: impl Read,
    industry: &str,
    storage: &dyn Storage,
) -> Result<ImportReport> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns = resolve_columns(csv_reader.headers()?)?;

    let mut report = ImportReport::default();
    let mut seen_phones: HashSet<String> = HashSet::new();

    for (row_number, record) in csv_reader.records().enumerate() {
        // Header is line 1.
        let line = (row_number + 2) as u64;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable row at line {}: {}", line, e);
                report.row_errors.push(RowError {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let prospect = match prospect_from_row(&record, &columns, industry) {
            Ok(prospect) => prospect,
            Err(e) => {
                warn!("Skipping row at line {}: {}", line, e);
                report.row_errors.push(RowError {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };

        if let Some(phone) = prospect.phone_number.as_deref() {
            if !seen_phones.insert(phone.to_string()) {
                report.duplicate_rows += 1;
                continue;
            }
        }

        match storage.upsert_prospect(prospect).await? {
            UpsertOutcome::Inserted => report.imported += 1,
            UpsertOutcome::Updated => report.updated += 1,
        }
    }

    info!(
        "Import finished: {} imported, {} updated, {} duplicate rows, {} row errors",
        report.imported,
        report.updated,
        report.duplicate_rows,
        report.row_errors.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    const HEADER: &str = "Name,Website,Phone,Address,Link\n";

    #[tokio::test]
    async fn rejects_csv_with_missing_columns() {
        let storage = InMemoryStorage::new();
        let csv = "Name,Phone\nYMCA,204-989-4106\n";
        let err = import_prospects_csv(csv.as_bytes(), "Fitness", &storage)
            .await
            .unwrap_err();
        assert!(matches!(err, ScraperError::Import(_)));
        assert_eq!(storage.prospect_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn imports_rows_and_derives_fields() {
        let storage = InMemoryStorage::new();
        let csv = format!(
            "{HEADER}YMCA,/gourl/?redirect=http%3A%2F%2Fymca.ca%2F,204-989-4106,\"301 Vaughan St, Winnipeg, MB R3B 2N6\",https://yp.ca/bus/1\n"
        );

        let report = import_prospects_csv(csv.as_bytes(), "Fitness", &storage)
            .await
            .unwrap();
        assert_eq!(report.imported, 1);
        assert!(report.row_errors.is_empty());

        let prospect = storage
            .get_prospect_by_phone("204-989-4106")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prospect.business_name.as_deref(), Some("YMCA"));
        assert_eq!(prospect.website_url.as_deref(), Some("http://ymca.ca/"));
        assert_eq!(prospect.city.as_deref(), Some("Winnipeg"));
        assert_eq!(prospect.province, Some(Province::MB));
        assert_eq!(prospect.industry, "Fitness");
    }

    #[tokio::test]
    async fn duplicate_phone_keeps_first_row() {
        let storage = InMemoryStorage::new();
        let csv = format!(
            "{HEADER}First,,204-668-7944,,\nSecond,,204-668-7944,,\n"
        );

        let report = import_prospects_csv(csv.as_bytes(), "Daycare", &storage)
            .await
            .unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.duplicate_rows, 1);

        let prospect = storage
            .get_prospect_by_phone("204-668-7944")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prospect.business_name.as_deref(), Some("First"));
    }

    #[tokio::test]
    async fn bad_website_link_skips_only_that_row() {
        let storage = InMemoryStorage::new();
        let csv = format!(
            "{HEADER}Broken,http://x/?url=nope,204-111-2222,,\nGood,,204-333-4444,,\n"
        );

        let report = import_prospects_csv(csv.as_bytes(), "Retail", &storage)
            .await
            .unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.row_errors.len(), 1);
        assert_eq!(report.row_errors[0].line, 2);
        assert!(storage
            .get_prospect_by_phone("204-333-4444")
            .await
            .unwrap()
            .is_some());
        assert!(storage
            .get_prospect_by_phone("204-111-2222")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn blank_fields_become_none() {
        let storage = InMemoryStorage::new();
        let csv = format!("{HEADER},,204-555-0000,,\n");

        let report = import_prospects_csv(csv.as_bytes(), "Retail", &storage)
            .await
            .unwrap();
        assert_eq!(report.imported, 1);

        let prospect = storage
            .get_prospect_by_phone("204-555-0000")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prospect.business_name, None);
        assert_eq!(prospect.website_url, None);
        assert_eq!(prospect.street_address, None);
        assert_eq!(prospect.city, None);
        assert_eq!(prospect.province, None);
    }
}
