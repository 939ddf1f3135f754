use super::IDeliveryLogRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::Utc;
use fitping_domain::{Day, DeliveryOutcome, DeliveryRecord, ID};

pub struct InMemoryDeliveryLogRepo {
    records: std::sync::Mutex<Vec<DeliveryRecord>>,
}

impl InMemoryDeliveryLogRepo {
    pub fn new() -> Self {
        Self {
            records: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryLogRepo for InMemoryDeliveryLogRepo {
    async fn try_claim(&self, user_id: &ID, date: &Day) -> anyhow::Result<bool> {
        let mut records = self.records.lock().unwrap();
        let claimed = records
            .iter()
            .any(|r| r.user_id == *user_id && r.date == *date);
        if claimed {
            return Ok(false);
        }
        records.push(DeliveryRecord {
            user_id: user_id.clone(),
            date: date.clone(),
            outcome: DeliveryOutcome::Pending,
            created: Utc::now().timestamp_millis(),
        });
        Ok(true)
    }

    async fn record_outcome(
        &self,
        user_id: &ID,
        date: &Day,
        outcome: DeliveryOutcome,
    ) -> anyhow::Result<()> {
        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut() {
            if record.user_id == *user_id && record.date == *date {
                record.outcome = outcome;
            }
        }
        Ok(())
    }

    async fn find(&self, user_id: &ID, date: &Day) -> Option<DeliveryRecord> {
        find_by(&self.records, |r| {
            r.user_id == *user_id && r.date == *date
        })
        .into_iter()
        .next()
    }
}
