pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use fieldsched_core::repository::Repositories;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::repositories::{
    field::PgFieldRepository, schedule::PgScheduleRepository, time_slot::PgTimeSlotRepository,
};

pub type DbPool = Pool<Postgres>;

/// Connection pool sizing and the deadline for checking out a connection.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

pub async fn create_pool(database_url: &str, settings: PoolSettings) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Wires the PostgreSQL repositories behind the core's persistence contract.
pub fn pg_repositories(pool: DbPool) -> Repositories {
    Repositories {
        fields: Arc::new(PgFieldRepository::new(pool.clone())),
        time_slots: Arc::new(PgTimeSlotRepository::new(pool.clone())),
        schedules: Arc::new(PgScheduleRepository::new(pool)),
    }
}
