use super::IWorkoutRepo;
use crate::repos::shared::inmemory_repo::*;
use fitping_domain::{Day, WorkoutInstance, ID};
use std::collections::HashSet;

pub struct InMemoryWorkoutRepo {
    workouts: std::sync::Mutex<Vec<WorkoutInstance>>,
    failing_users: std::sync::Mutex<HashSet<String>>,
}

impl InMemoryWorkoutRepo {
    pub fn new() -> Self {
        Self {
            workouts: std::sync::Mutex::new(Vec::new()),
            failing_users: std::sync::Mutex::new(HashSet::new()),
        }
    }

    /// Makes every lookup for the given user fail
    pub fn fail_for_user(&self, user_id: &ID) {
        self.failing_users
            .lock()
            .unwrap()
            .insert(user_id.as_string());
    }
}

#[async_trait::async_trait]
impl IWorkoutRepo for InMemoryWorkoutRepo {
    async fn insert(&self, workout: &WorkoutInstance) -> anyhow::Result<()> {
        insert(workout, &self.workouts);
        Ok(())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &ID,
        date: &Day,
    ) -> anyhow::Result<Option<WorkoutInstance>> {
        if self
            .failing_users
            .lock()
            .unwrap()
            .contains(&user_id.as_string())
        {
            return Err(anyhow::Error::msg("Workout storage unavailable"));
        }
        let mut matches = find_by(&self.workouts, |w| {
            w.user_id == *user_id && w.date == *date
        });
        matches.sort_by(|w1, w2| {
            w1.created
                .cmp(&w2.created)
                .then(w1.id.as_string().cmp(&w2.id.as_string()))
        });
        Ok(matches.into_iter().next())
    }
}
