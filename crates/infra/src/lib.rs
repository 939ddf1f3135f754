mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{InMemoryDeliveryLogRepo, InMemoryUserRepo, InMemoryWorkoutRepo, Repos};
pub use services::{
    HttpMessageComposer, HttpSmsGateway, IMessageComposer, ISmsGateway, InMemoryMessageComposer,
    InMemorySmsGateway, OutboundSms, Services,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
pub use system::RealSys;

#[derive(Clone)]
pub struct FitpingContext {
    pub repos: Repos,
    pub services: Services,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl FitpingContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        Self {
            repos,
            services: Services::create_http(&config),
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Context without external collaborators, used by tests and local
    /// development. Messages are recorded instead of sent.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            services: Services::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> FitpingContext {
    FitpingContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
