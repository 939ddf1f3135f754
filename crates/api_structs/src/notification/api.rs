use crate::notification::dtos::BatchSummaryDTO;
use fitping_domain::BatchSummary;
use serde::{Deserialize, Serialize};

pub mod trigger_hourly_batch {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub summary: BatchSummaryDTO,
    }

    impl APIResponse {
        pub fn new(summary: BatchSummary) -> Self {
            Self {
                summary: BatchSummaryDTO::new(summary),
            }
        }
    }
}
