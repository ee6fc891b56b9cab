use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::error::{FIELD_CODE_CONSTRAINT, SCHEDULE_FIELD_FOREIGN_KEY, SCHEDULE_SLOT_CONSTRAINT};

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create fields table
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS fields (
            id BIGSERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE DEFAULT gen_random_uuid(),
            code VARCHAR(15) NOT NULL,
            name VARCHAR(100) NOT NULL,
            price_per_hour BIGINT NOT NULL CHECK (price_per_hour >= 0),
            images TEXT[] NOT NULL DEFAULT '{{}}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT {FIELD_CODE_CONSTRAINT} UNIQUE (code)
        );
        "#
    ))
    .execute(pool)
    .await?;

    // Create times table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS times (
            id BIGSERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE DEFAULT gen_random_uuid(),
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create field_schedules table; the slot constraint is what makes
    // concurrent generation and creation safe.
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS field_schedules (
            id BIGSERIAL PRIMARY KEY,
            uuid UUID NOT NULL UNIQUE,
            field_id BIGINT NOT NULL,
            time_id BIGINT NOT NULL REFERENCES times(id),
            date DATE NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'available',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT {SCHEDULE_FIELD_FOREIGN_KEY} FOREIGN KEY (field_id) REFERENCES fields(id),
            CONSTRAINT valid_status CHECK (status IN ('available', 'booked')),
            CONSTRAINT {SCHEDULE_SLOT_CONSTRAINT} UNIQUE (field_id, date, time_id)
        );
        "#
    ))
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_fields_created_at ON fields(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_times_start_time ON times(start_time)",
        "CREATE INDEX IF NOT EXISTS idx_field_schedules_date ON field_schedules(date)",
        "CREATE INDEX IF NOT EXISTS idx_field_schedules_time_id ON field_schedules(time_id)",
        "CREATE INDEX IF NOT EXISTS idx_field_schedules_created_at ON field_schedules(created_at)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
