use super::IDeliveryLogRepo;
use chrono::{NaiveDate, Utc};
use fitping_domain::{Day, DeliveryOutcome, DeliveryRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresDeliveryLogRepo {
    pool: PgPool,
}

impl PostgresDeliveryLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DeliveryRecordRaw {
    user_uid: Uuid,
    date: NaiveDate,
    outcome: String,
    created: i64,
}

impl Into<DeliveryRecord> for DeliveryRecordRaw {
    fn into(self) -> DeliveryRecord {
        DeliveryRecord {
            user_id: self.user_uid.into(),
            date: Day::from(self.date),
            outcome: self.outcome.parse().unwrap_or(DeliveryOutcome::Failed),
            created: self.created,
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryLogRepo for PostgresDeliveryLogRepo {
    async fn try_claim(&self, user_id: &ID, date: &Day) -> anyhow::Result<bool> {
        // The (user_uid, date) primary key makes this race-safe between
        // concurrent units
        let res = sqlx::query(
            r#"
            INSERT INTO delivery_log(user_uid, date, outcome, created)
            VALUES($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(*user_id.inner_ref())
        .bind(date.naive_date()?)
        .bind(DeliveryOutcome::Pending.to_string())
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn record_outcome(
        &self,
        user_id: &ID,
        date: &Day,
        outcome: DeliveryOutcome,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE delivery_log
            SET outcome = $3
            WHERE user_uid = $1 AND date = $2
            "#,
        )
        .bind(*user_id.inner_ref())
        .bind(date.naive_date()?)
        .bind(outcome.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID, date: &Day) -> Option<DeliveryRecord> {
        let date = match date.naive_date() {
            Ok(date) => date,
            Err(_) => return None,
        };
        match sqlx::query_as::<_, DeliveryRecordRaw>(
            r#"
            SELECT * FROM delivery_log AS d
            WHERE d.user_uid = $1 AND d.date = $2
            "#,
        )
        .bind(*user_id.inner_ref())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        {
            Ok(record) => Some(record.into()),
            Err(_) => None,
        }
    }
}
