use async_trait::async_trait;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use super::map_store_error;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, format_posted_at, parse_posted_at};

#[derive(Debug, Clone)]
pub(crate) struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: String,
    user_id: String,
    text: String,
    parent_post_id: Option<String>,
    comment_count: i64,
    posted_at: String,
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                user_id,
                text,
                parent_post_id,
                comment_count,
                posted_at
            FROM posts
            ORDER BY posted_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn list_comments(&self, parent_post_id: &str) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                user_id,
                text,
                parent_post_id,
                comment_count,
                posted_at
            FROM posts
            WHERE parent_post_id = ?1
            ORDER BY posted_at DESC, rowid DESC
            "#,
        )
        .bind(parent_post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        insert_post(&self.pool, &input, None)
            .await
            .map_err(map_store_error)?;

        into_post(input, None)
    }

    async fn create_comment(
        &self,
        parent_post_id: &str,
        input: NewPost,
    ) -> Result<Post, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_store_error)?;

        if let Err(err) = increment_comment_count(&mut *tx, parent_post_id).await {
            tx.rollback().await.map_err(map_store_error)?;
            return Err(err);
        }

        insert_post(&mut *tx, &input, Some(parent_post_id))
            .await
            .map_err(map_store_error)?;
        tx.commit().await.map_err(map_store_error)?;

        debug!(parent_post_id, comment_id = %input.id, "comment stored");
        into_post(input, Some(parent_post_id.to_string()))
    }
}

/// Atomic `comment_count + 1`; `NotFound` when no post has this id.
pub(crate) async fn increment_comment_count<'e, E>(
    executor: E,
    post_id: &str,
) -> Result<(), DomainError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET comment_count = comment_count + 1
        WHERE id = ?1
        "#,
    )
    .bind(post_id)
    .execute(executor)
    .await
    .map_err(map_store_error)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::NotFound(format!("post id: {post_id}")));
    }
    Ok(())
}

async fn insert_post<'e, E>(
    executor: E,
    input: &NewPost,
    parent_post_id: Option<&str>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO posts (id, user_id, text, parent_post_id, comment_count, posted_at)
        VALUES (?1, ?2, ?3, ?4, 0, ?5)
        "#,
    )
    .bind(input.id.as_str())
    .bind(input.user_id.as_str())
    .bind(input.text.as_str())
    .bind(parent_post_id)
    .bind(format_posted_at(input.posted_at))
    .execute(executor)
    .await?;

    Ok(())
}

fn into_post(input: NewPost, parent_post_id: Option<String>) -> Result<Post, DomainError> {
    Post::new(
        input.id,
        input.user_id,
        input.text,
        parent_post_id,
        0,
        input.posted_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

/// Stored rows are trusted as written; only the timestamp needs decoding.
fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Ok(Post {
        id: row.id,
        user_id: row.user_id,
        text: row.text,
        parent_post_id: row.parent_post_id.filter(|parent| !parent.is_empty()),
        comment_count: row.comment_count,
        posted_at: parse_posted_at(&row.posted_at)?,
    })
}
