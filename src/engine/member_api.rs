use super::Engine;

use async_trait::async_trait;
use sqlx::{Executor, Row};

use crate::{
    api::MemberAPI,
    entities::{Member, Role},
    error::{invalid_input_error, not_found_error, Error},
};

#[async_trait]
impl MemberAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_member_by_phone_number(&self, phone_number: &str) -> Result<Member, Error> {
        let phone_number = phone_number.trim();

        if phone_number.is_empty() {
            return Err(invalid_input_error());
        }

        let mut conn = self.pool.acquire().await?;

        let row = conn
            .fetch_optional(
                sqlx::query("SELECT id, phone, name, role FROM users WHERE phone = $1")
                    .bind(phone_number),
            )
            .await?
            .ok_or_else(|| not_found_error("User not found"))?;

        let role: String = row.try_get("role")?;

        Ok(Member {
            id: row.try_get("id")?,
            phone_number: row.try_get("phone")?,
            name: row.try_get("name")?,
            role: role.parse::<Role>()?,
        })
    }
}
