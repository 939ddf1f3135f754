use crate::day::Day;
use crate::shared::entity::ID;
use std::fmt::Display;
use std::str::FromStr;

/// One row of the delivery log. A record existing for (user, local date)
/// means the day's send slot is consumed, regardless of outcome: the
/// scheduler attempts at most one send per user per local calendar day.
#[derive(Debug, Clone)]
pub struct DeliveryRecord {
    pub user_id: ID,
    pub date: Day,
    pub outcome: DeliveryOutcome,
    pub created: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Slot claimed, send in progress
    Pending,
    Sent,
    Failed,
    /// No workout existed for the date
    Skipped,
}

impl Display for DeliveryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        };
        write!(f, "{}", outcome)
    }
}

impl FromStr for DeliveryOutcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            _ => Err(anyhow::Error::msg(format!(
                "Invalid delivery outcome: {}",
                s
            ))),
        }
    }
}
