use async_trait::async_trait;
use sqlx::SqlitePool;

use super::map_store_error;
use crate::data::user_directory::UserDirectory;
use crate::domain::error::DomainError;

/// Users allowed to post are the rows of the `users` table.
#[derive(Debug, Clone)]
pub(crate) struct SqliteUserDirectory {
    pool: SqlitePool,
}

impl SqliteUserDirectory {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn contains(&self, user_id: &str) -> Result<bool, DomainError> {
        let exists: i64 = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(exists != 0)
    }
}
