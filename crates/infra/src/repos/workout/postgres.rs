use super::IWorkoutRepo;
use chrono::NaiveDate;
use fitping_domain::{Day, WorkoutInstance, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresWorkoutRepo {
    pool: PgPool,
}

impl PostgresWorkoutRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct WorkoutRaw {
    workout_uid: Uuid,
    user_uid: Uuid,
    date: NaiveDate,
    session: serde_json::Value,
    created: i64,
}

impl Into<WorkoutInstance> for WorkoutRaw {
    fn into(self) -> WorkoutInstance {
        WorkoutInstance {
            id: self.workout_uid.into(),
            user_id: self.user_uid.into(),
            date: Day::from(self.date),
            session: serde_json::from_value(self.session).unwrap_or_default(),
            created: self.created,
        }
    }
}

#[async_trait::async_trait]
impl IWorkoutRepo for PostgresWorkoutRepo {
    async fn insert(&self, workout: &WorkoutInstance) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workout_instances(workout_uid, user_uid, date, session, created)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*workout.id.inner_ref())
        .bind(*workout.user_id.inner_ref())
        .bind(workout.date.naive_date()?)
        .bind(serde_json::to_value(&workout.session)?)
        .bind(workout.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &ID,
        date: &Day,
    ) -> anyhow::Result<Option<WorkoutInstance>> {
        // Deterministic tie-break when several instances share the date
        let workout = sqlx::query_as::<_, WorkoutRaw>(
            r#"
            SELECT * FROM workout_instances AS w
            WHERE w.user_uid = $1 AND w.date = $2
            ORDER BY w.created ASC, w.workout_uid ASC
            LIMIT 1
            "#,
        )
        .bind(*user_id.inner_ref())
        .bind(date.naive_date()?)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workout.map(|w| w.into()))
    }
}
