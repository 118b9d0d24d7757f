use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres};

use crate::entities::DriverState;
use crate::error::Error;

pub type Database = Postgres;

/// Key of the single `driver_state` row.
pub const DRIVER_STATE_ID: i32 = 1;

#[tracing::instrument(skip(db_uri))]
pub async fn connect(db_uri: &str, max_connections: u32) -> Result<Pool<Database>, Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(db_uri)
        .await?;

    Ok(pool)
}

/// Creates the tables when missing and seeds the driver state row.
#[tracing::instrument(skip_all)]
pub async fn migrate(pool: &Pool<Database>) -> Result<(), Error> {
    pool.execute(
        "CREATE TABLE IF NOT EXISTS users (id UUID PRIMARY KEY, phone VARCHAR NOT NULL UNIQUE, name VARCHAR NOT NULL, role VARCHAR NOT NULL DEFAULT 'passenger')",
    )
    .await?;

    pool.execute("CREATE TABLE IF NOT EXISTS driver_state (id INT4 PRIMARY KEY, data JSONB NOT NULL)")
        .await?;

    pool.execute(
        sqlx::query("INSERT INTO driver_state (id, data) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(DRIVER_STATE_ID)
            .bind(Json(DriverState::default())),
    )
    .await?;

    Ok(())
}
