use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{CallOutcome, CallRecord, Prospect};
use crate::error::Result;

/// What an upsert did with the incoming prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Storage trait for prospects and call records.
#[async_trait]
pub trait Storage: Send + Sync {
    // Prospect operations
    async fn upsert_prospect(&self, prospect: Prospect) -> Result<UpsertOutcome>;
    async fn get_prospect_by_phone(&self, phone: &str) -> Result<Option<Prospect>>;
    async fn list_prospects(&self) -> Result<Vec<Prospect>>;
    async fn prospect_count(&self) -> Result<usize>;
    async fn delete_all_prospects(&self) -> Result<()>;

    // Call record operations
    async fn create_call_record(&self, record: CallRecord) -> Result<()>;
    async fn list_call_records(&self) -> Result<Vec<CallRecord>>;
    async fn call_count(&self) -> Result<usize>;
    async fn calls_today_count(&self, today: NaiveDate) -> Result<usize>;
    async fn calls_outcome_no_count(&self) -> Result<usize>;
    async fn has_been_called(&self, prospect_id: Uuid) -> Result<bool>;
    async fn had_owner_conversation(&self, prospect_id: Uuid) -> Result<bool>;
    async fn delete_all_call_records(&self) -> Result<()>;
}

/// In-memory storage implementation for CLI runs and testing.
pub struct InMemoryStorage {
    prospects: Arc<Mutex<HashMap<Uuid, Prospect>>>,
    phone_index: Arc<Mutex<HashMap<String, Uuid>>>,
    call_records: Arc<Mutex<HashMap<Uuid, CallRecord>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            prospects: Arc::new(Mutex::new(HashMap::new())),
            phone_index: Arc::new(Mutex::new(HashMap::new())),
            call_records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn upsert_prospect(&self, prospect: Prospect) -> Result<UpsertOutcome> {
        let mut prospects = self.prospects.lock().unwrap();
        let mut phone_index = self.phone_index.lock().unwrap();

        // Phone number is the conflict key; an existing prospect only gets
        // its industry refreshed, matching the bulk import semantics.
        if let Some(phone) = prospect.phone_number.as_deref() {
            if let Some(existing_id) = phone_index.get(phone).copied() {
                if let Some(existing) = prospects.get_mut(&existing_id) {
                    existing.industry = prospect.industry;
                    existing.updated_at = chrono::Utc::now();
                    debug!("Updated prospect {} by phone {}", existing_id, phone);
                    return Ok(UpsertOutcome::Updated);
                }
            }
            phone_index.insert(phone.to_string(), prospect.id);
        }

        debug!("Inserted prospect {}", prospect.id);
        prospects.insert(prospect.id, prospect);
        Ok(UpsertOutcome::Inserted)
    }

    async fn get_prospect_by_phone(&self, phone: &str) -> Result<Option<Prospect>> {
        let prospects = self.prospects.lock().unwrap();
        let phone_index = self.phone_index.lock().unwrap();
        Ok(phone_index
            .get(phone)
            .and_then(|id| prospects.get(id))
            .cloned())
    }

    async fn list_prospects(&self) -> Result<Vec<Prospect>> {
        let prospects = self.prospects.lock().unwrap();
        let mut all: Vec<Prospect> = prospects.values().cloned().collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }

    async fn prospect_count(&self) -> Result<usize> {
        Ok(self.prospects.lock().unwrap().len())
    }

    async fn delete_all_prospects(&self) -> Result<()> {
        self.prospects.lock().unwrap().clear();
        self.phone_index.lock().unwrap().clear();
        Ok(())
    }

    async fn create_call_record(&self, record: CallRecord) -> Result<()> {
        let mut call_records = self.call_records.lock().unwrap();
        debug!("Created call record {} for prospect {}", record.id, record.prospect_id);
        call_records.insert(record.id, record);
        Ok(())
    }

    async fn list_call_records(&self) -> Result<Vec<CallRecord>> {
        let call_records = self.call_records.lock().unwrap();
        let mut all: Vec<CallRecord> = call_records.values().cloned().collect();
        all.sort_by_key(|r| r.date);
        Ok(all)
    }

    async fn call_count(&self) -> Result<usize> {
        Ok(self.call_records.lock().unwrap().len())
    }

    async fn calls_today_count(&self, today: NaiveDate) -> Result<usize> {
        let call_records = self.call_records.lock().unwrap();
        Ok(call_records
            .values()
            .filter(|r| r.date.date_naive() == today)
            .count())
    }

    async fn calls_outcome_no_count(&self) -> Result<usize> {
        let call_records = self.call_records.lock().unwrap();
        Ok(call_records
            .values()
            .filter(|r| r.outcome == Some(CallOutcome::No))
            .count())
    }

    async fn has_been_called(&self, prospect_id: Uuid) -> Result<bool> {
        let call_records = self.call_records.lock().unwrap();
        Ok(call_records.values().any(|r| r.prospect_id == prospect_id))
    }

    async fn had_owner_conversation(&self, prospect_id: Uuid) -> Result<bool> {
        let call_records = self.call_records.lock().unwrap();
        Ok(call_records
            .values()
            .any(|r| r.prospect_id == prospect_id && r.had_owner_conversation))
    }

    async fn delete_all_call_records(&self) -> Result<()> {
        self.call_records.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prospect_with_phone(industry: &str, phone: &str) -> Prospect {
        let mut prospect = Prospect::new(industry);
        prospect.phone_number = Some(phone.to_string());
        prospect
    }

    #[tokio::test]
    async fn upsert_by_phone_updates_industry_only() {
        let storage = InMemoryStorage::new();

        let mut first = prospect_with_phone("Daycare", "204-668-7944");
        first.business_name = Some("Elmwood Day Nursery Inc".to_string());
        assert_eq!(
            storage.upsert_prospect(first).await.unwrap(),
            UpsertOutcome::Inserted
        );

        let mut second = prospect_with_phone("Childcare", "204-668-7944");
        second.business_name = Some("Some Other Name".to_string());
        assert_eq!(
            storage.upsert_prospect(second).await.unwrap(),
            UpsertOutcome::Updated
        );

        assert_eq!(storage.prospect_count().await.unwrap(), 1);
        let stored = storage
            .get_prospect_by_phone("204-668-7944")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.industry, "Childcare");
        assert_eq!(
            stored.business_name.as_deref(),
            Some("Elmwood Day Nursery Inc")
        );
    }

    #[tokio::test]
    async fn prospects_without_phone_always_insert() {
        let storage = InMemoryStorage::new();
        storage.upsert_prospect(Prospect::new("Retail")).await.unwrap();
        storage.upsert_prospect(Prospect::new("Retail")).await.unwrap();
        assert_eq!(storage.prospect_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn call_record_flags_reflect_records() {
        let storage = InMemoryStorage::new();
        let prospect = prospect_with_phone("Retail", "416-555-0100");
        let prospect_id = prospect.id;
        storage.upsert_prospect(prospect).await.unwrap();

        assert!(!storage.has_been_called(prospect_id).await.unwrap());

        let mut record = CallRecord::new(prospect_id);
        record.outcome = Some(CallOutcome::No);
        storage.create_call_record(record).await.unwrap();

        assert!(storage.has_been_called(prospect_id).await.unwrap());
        assert!(!storage.had_owner_conversation(prospect_id).await.unwrap());

        let mut second = CallRecord::new(prospect_id);
        second.had_owner_conversation = true;
        storage.create_call_record(second).await.unwrap();

        assert!(storage.had_owner_conversation(prospect_id).await.unwrap());
        assert_eq!(storage.call_count().await.unwrap(), 2);
        assert_eq!(storage.calls_outcome_no_count().await.unwrap(), 1);
        assert_eq!(
            storage
                .calls_today_count(chrono::Utc::now().date_naive())
                .await
                .unwrap(),
            2
        );
    }
}
