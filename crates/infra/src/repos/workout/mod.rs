mod inmemory;
mod postgres;

pub use inmemory::InMemoryWorkoutRepo;
pub use postgres::PostgresWorkoutRepo;

use fitping_domain::{Day, WorkoutInstance, ID};

#[async_trait::async_trait]
pub trait IWorkoutRepo: Send + Sync {
    async fn insert(&self, workout: &WorkoutInstance) -> anyhow::Result<()>;
    /// The workout for one user on one local calendar date. If several
    /// instances exist for the date the earliest created wins, with the
    /// id as a stable secondary order. Absence is a normal skip, not an
    /// error.
    async fn find_by_user_and_date(
        &self,
        user_id: &ID,
        date: &Day,
    ) -> anyhow::Result<Option<WorkoutInstance>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::Repos;
    use fitping_domain::WorkoutSession;

    fn session(title: &str) -> WorkoutSession {
        WorkoutSession {
            title: title.into(),
            focus: None,
            exercises: Vec::new(),
        }
    }

    #[tokio::test]
    async fn lookup_is_bounded_to_the_date() {
        let repos = Repos::create_inmemory();
        let user_id = ID::new();
        let date = "2021-7-1".parse::<Day>().unwrap();

        let workout = WorkoutInstance::new(user_id.clone(), date.clone(), session("Legs"), 100);
        repos
            .workouts
            .insert(&workout)
            .await
            .expect("To insert workout");

        let found = repos
            .workouts
            .find_by_user_and_date(&user_id, &date)
            .await
            .expect("To query workouts");
        assert_eq!(found.map(|w| w.id), Some(workout.id));

        let other_date = "2021-7-2".parse::<Day>().unwrap();
        let found = repos
            .workouts
            .find_by_user_and_date(&user_id, &other_date)
            .await
            .expect("To query workouts");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_dates_resolve_to_the_earliest_created() {
        let repos = Repos::create_inmemory();
        let user_id = ID::new();
        let date = "2021-7-1".parse::<Day>().unwrap();

        let late = WorkoutInstance::new(user_id.clone(), date.clone(), session("Late"), 200);
        let early = WorkoutInstance::new(user_id.clone(), date.clone(), session("Early"), 100);
        repos.workouts.insert(&late).await.expect("To insert");
        repos.workouts.insert(&early).await.expect("To insert");

        let found = repos
            .workouts
            .find_by_user_and_date(&user_id, &date)
            .await
            .expect("To query workouts")
            .expect("A workout");
        assert_eq!(found.id, early.id);
        assert_eq!(found.session.title, "Early");
    }
}
