use sqlx::{types::Json, Executor, Row, Transaction};

use super::Database;

use crate::{db::DRIVER_STATE_ID, entities::DriverState, error::Error};

#[tracing::instrument(skip(tx))]
pub async fn fetch_driver_state_for_update(
    tx: &mut Transaction<'_, Database>,
) -> Result<DriverState, Error> {
    let maybe_row = tx
        .fetch_optional(
            sqlx::query("SELECT data FROM driver_state WHERE id = $1 FOR UPDATE")
                .bind(DRIVER_STATE_ID),
        )
        .await?;

    match maybe_row {
        Some(row) => {
            let Json(state) = row.try_get("data")?;
            Ok(state)
        }
        None => Ok(DriverState::default()),
    }
}

#[tracing::instrument(skip(tx))]
pub async fn update_driver_state(
    tx: &mut Transaction<'_, Database>,
    state: &DriverState,
) -> Result<(), Error> {
    tx.execute(
        sqlx::query(
            "INSERT INTO driver_state (id, data) VALUES ($1, $2) ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(DRIVER_STATE_ID)
        .bind(Json(state)),
    )
    .await?;

    Ok(())
}
