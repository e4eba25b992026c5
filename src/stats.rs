use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::Result;
use crate::storage::Storage;

/// Dashboard counters for a calling session.
#[derive(Debug, Clone, Serialize)]
pub struct CallStats {
    pub total_calls: usize,
    pub outcome_no_count: usize,
    pub calls_today: usize,
    pub total_prospects: usize,
}

pub async fn gather_call_stats(storage: &dyn Storage) -> Result<CallStats> {
    let today = Utc::now().date_naive();
    Ok(CallStats {
        total_calls: storage.call_count().await?,
        outcome_no_count: storage.calls_outcome_no_count().await?,
        calls_today: storage.calls_today_count(today).await?,
        total_prospects: storage.prospect_count().await?,
    })
}

/// Current local times across the Canadian calling window, as "HH:MM".
#[derive(Debug, Clone, Serialize)]
pub struct CityTimes {
    pub halifax: String,
    pub toronto: String,
    pub winnipeg: String,
    pub edmonton: String,
    pub vancouver: String,
}

impl CityTimes {
    pub fn now() -> Self {
        Self {
            halifax: local_hhmm(chrono_tz::America::Halifax),
            toronto: local_hhmm(chrono_tz::America::Toronto),
            winnipeg: local_hhmm(chrono_tz::America::Winnipeg),
            edmonton: local_hhmm(chrono_tz::America::Edmonton),
            vancouver: local_hhmm(chrono_tz::America::Vancouver),
        }
    }
}

fn local_hhmm(tz: Tz) -> String {
    Utc::now().with_timezone(&tz).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    #[tokio::test]
    async fn stats_on_empty_storage_are_zero() {
        let storage = InMemoryStorage::new();
        let stats = gather_call_stats(&storage).await.unwrap();
        assert_eq!(stats.total_calls, 0);
        assert_eq!(stats.outcome_no_count, 0);
        assert_eq!(stats.calls_today, 0);
        assert_eq!(stats.total_prospects, 0);
    }

    #[test]
    fn city_times_format_as_hh_mm() {
        let times = CityTimes::now();
        for value in [
            &times.halifax,
            &times.toronto,
            &times.winnipeg,
            &times.edmonton,
            &times.vancouver,
        ] {
            assert_eq!(value.len(), 5);
            assert_eq!(value.as_bytes()[2], b':');
        }
    }
}
