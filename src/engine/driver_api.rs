use super::helpers::{fetch_driver_state_for_update, update_driver_state};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::DriverAPI,
    auth::User,
    db::DRIVER_STATE_ID,
    entities::{DriverState, DriverStatus},
    error::Error,
};

impl Engine {
    /// Loads the state for update, applies `change` if `user` may update it
    /// and writes it back in the same transaction.
    async fn modify_driver_state<F>(&self, user: User, change: F) -> Result<DriverState, Error>
    where
        F: FnOnce(&mut DriverState) -> Result<(), Error> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let mut state = fetch_driver_state_for_update(&mut tx).await?;

        self.authorize(user, "update", state.clone())?;

        change(&mut state)?;

        update_driver_state(&mut tx, &state).await?;

        tx.commit().await?;

        Ok(state)
    }
}

#[async_trait]
impl DriverAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_driver_state(&self, user: User) -> Result<DriverState, Error> {
        let mut conn = self.pool.acquire().await?;

        let state = match conn
            .fetch_optional(
                sqlx::query("SELECT data FROM driver_state WHERE id = $1").bind(DRIVER_STATE_ID),
            )
            .await?
        {
            Some(row) => {
                let Json(state): Json<DriverState> = row.try_get("data")?;
                state
            }
            None => DriverState::default(),
        };

        self.authorize(user, "read", state.clone())?;

        Ok(state)
    }

    #[tracing::instrument(skip(self))]
    async fn update_driver_status(
        &self,
        user: User,
        status: DriverStatus,
    ) -> Result<DriverState, Error> {
        self.modify_driver_state(user, |state| {
            state.set_status(status);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn update_tariffs(
        &self,
        user: User,
        day_rate: &str,
        night_rate: &str,
    ) -> Result<DriverState, Error> {
        self.modify_driver_state(user, |state| state.update_tariffs(day_rate, night_rate))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn update_driver_phone_number(
        &self,
        user: User,
        phone_number: &str,
    ) -> Result<DriverState, Error> {
        self.modify_driver_state(user, |state| state.update_phone_number(phone_number))
            .await
    }
}
