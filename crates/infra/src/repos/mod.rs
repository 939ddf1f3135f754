mod delivery_log;
mod shared;
mod user;
mod workout;

use delivery_log::PostgresDeliveryLogRepo;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::PostgresUserRepo;
use workout::PostgresWorkoutRepo;

pub use delivery_log::{IDeliveryLogRepo, InMemoryDeliveryLogRepo};
pub use user::{IUserRepo, InMemoryUserRepo};
pub use workout::{IWorkoutRepo, InMemoryWorkoutRepo};

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub workouts: Arc<dyn IWorkoutRepo>,
    pub delivery_logs: Arc<dyn IDeliveryLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            workouts: Arc::new(PostgresWorkoutRepo::new(pool.clone())),
            delivery_logs: Arc::new(PostgresDeliveryLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            workouts: Arc::new(InMemoryWorkoutRepo::new()),
            delivery_logs: Arc::new(InMemoryDeliveryLogRepo::new()),
        }
    }
}
