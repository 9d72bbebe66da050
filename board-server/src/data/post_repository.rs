use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// Server-assigned fields of a post that is about to be stored.
#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) text: String,
    pub(crate) posted_at: DateTime<Utc>,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// Every stored post, comments included, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
    async fn list_comments(&self, parent_post_id: &str) -> Result<Vec<Post>, DomainError>;
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    /// Bumps the parent's `comment_count` and stores the comment as one unit.
    /// Fails with `NotFound` and stores nothing when the parent is missing.
    async fn create_comment(
        &self,
        parent_post_id: &str,
        input: NewPost,
    ) -> Result<Post, DomainError>;
}
