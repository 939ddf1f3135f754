mod batch;
mod day;
mod delivery;
mod resolver;
mod shared;
mod user;
mod workout;

pub use batch::{BatchSummary, FailedNotification, NotificationFailure};
pub use day::Day;
pub use delivery::{DeliveryOutcome, DeliveryRecord};
pub use resolver::{resolve_send_hour, truncate_to_hour, HourResolution};
pub use shared::entity::{Entity, ID};
pub use user::User;
pub use workout::{Exercise, WorkoutInstance, WorkoutSession};
