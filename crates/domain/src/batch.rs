use crate::shared::entity::ID;
use thiserror::Error;

/// Why an eligible user did not get their message this run. None of these
/// are retried within the run, the user is reported and left for the next
/// qualifying hour or day.
#[derive(Debug, Clone, Error)]
pub enum NotificationFailure {
    #[error("No workout scheduled for the user's local date")]
    NoWorkout,
    #[error("Message composition failed: {0}")]
    Compose(String),
    #[error("SMS dispatch failed: {0}")]
    Dispatch(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Notification timed out")]
    Timeout,
}

#[derive(Debug, Clone)]
pub struct FailedNotification {
    pub user_id: ID,
    pub reason: NotificationFailure,
}

/// Aggregate result of one hourly batch run. Ephemeral, lives only for
/// the run's logging and the operator response.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Messages sent
    pub processed: usize,
    /// Eligible but not sent
    pub failed: usize,
    pub errors: Vec<FailedNotification>,
}

impl BatchSummary {
    pub fn record_sent(&mut self) {
        self.processed += 1;
    }

    pub fn record_failure(&mut self, user_id: ID, reason: NotificationFailure) {
        self.failed += 1;
        self.errors.push(FailedNotification { user_id, reason });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn aggregates_outcomes() {
        let mut summary = BatchSummary::default();
        summary.record_sent();
        summary.record_sent();
        summary.record_failure(ID::new(), NotificationFailure::NoWorkout);

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors.len(), 1);
    }
}
