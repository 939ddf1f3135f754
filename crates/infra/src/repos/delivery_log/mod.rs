mod inmemory;
mod postgres;

pub use inmemory::InMemoryDeliveryLogRepo;
pub use postgres::PostgresDeliveryLogRepo;

use fitping_domain::{Day, DeliveryOutcome, DeliveryRecord, ID};

#[async_trait::async_trait]
pub trait IDeliveryLogRepo: Send + Sync {
    /// Atomically claims the (user, local date) send slot. Returns false
    /// when the slot is already claimed, which is how duplicate sends are
    /// prevented on fall-back DST days and operator re-runs.
    async fn try_claim(&self, user_id: &ID, date: &Day) -> anyhow::Result<bool>;
    /// Records the terminal outcome of a claimed slot
    async fn record_outcome(
        &self,
        user_id: &ID,
        date: &Day,
        outcome: DeliveryOutcome,
    ) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID, date: &Day) -> Option<DeliveryRecord>;
}
