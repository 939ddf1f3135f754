use crate::day::Day;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A workout scheduled for one user on one local calendar date. Created
/// by the planning subsystem, read-only to the scheduler.
#[derive(Debug, Clone)]
pub struct WorkoutInstance {
    pub id: ID,
    pub user_id: ID,
    pub date: Day,
    pub session: WorkoutSession,
    /// Creation timestamp in millis. The lookup uses this as a stable
    /// tie-break when several instances exist for the same date.
    pub created: i64,
}

impl WorkoutInstance {
    pub fn new(user_id: ID, date: Day, session: WorkoutSession, created: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            date,
            session,
            created,
        }
    }
}

impl Entity<ID> for WorkoutInstance {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub title: String,
    pub focus: Option<String>,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}
