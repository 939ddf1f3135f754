use fitping_domain::{BatchSummary, FailedNotification, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummaryDTO {
    pub processed: usize,
    pub failed: usize,
    pub errors: Vec<FailedNotificationDTO>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FailedNotificationDTO {
    pub user_id: ID,
    pub error: String,
}

impl BatchSummaryDTO {
    pub fn new(summary: BatchSummary) -> Self {
        Self {
            processed: summary.processed,
            failed: summary.failed,
            errors: summary
                .errors
                .into_iter()
                .map(FailedNotificationDTO::new)
                .collect(),
        }
    }
}

impl FailedNotificationDTO {
    pub fn new(failure: FailedNotification) -> Self {
        Self {
            user_id: failure.user_id,
            error: failure.reason.to_string(),
        }
    }
}
