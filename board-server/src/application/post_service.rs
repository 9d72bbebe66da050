use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostRepository};
use crate::data::user_directory::UserDirectory;
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post};

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
    users: Arc<dyn UserDirectory>,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R, users: Arc<dyn UserDirectory>) -> Self {
        Self { repo, users }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts().await
    }

    pub(crate) async fn list_comments(&self, post_id: &str) -> Result<Vec<Post>, DomainError> {
        self.repo.list_comments(post_id).await
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let req = self.check(req).await?;

        let post = self.repo.create_post(Self::new_post(req)).await?;
        info!(post_id = %post.id, user_id = %post.user_id, "post created");
        Ok(post)
    }

    pub(crate) async fn create_comment(
        &self,
        parent_post_id: &str,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = self.check(req).await?;

        let comment = self
            .repo
            .create_comment(parent_post_id, Self::new_post(req))
            .await
            .map_err(|err| match err {
                DomainError::NotFound(_) => {
                    warn!(parent_post_id, "rejected comment on missing post");
                    DomainError::UnknownParent(parent_post_id.to_string())
                }
                other => other,
            })?;
        info!(
            post_id = %comment.id,
            parent_post_id,
            user_id = %comment.user_id,
            "comment created"
        );
        Ok(comment)
    }

    /// User first, then text; nothing is written if either fails.
    async fn check(&self, req: CreatePostRequest) -> Result<CreatePostRequest, DomainError> {
        if !self.users.contains(&req.user_id).await? {
            warn!(user_id = %req.user_id, "rejected post from unknown user");
            return Err(DomainError::UnknownUser);
        }
        req.validate_text()
    }

    fn new_post(req: CreatePostRequest) -> NewPost {
        NewPost {
            id: Uuid::new_v4().to_string(),
            user_id: req.user_id,
            text: req.text,
            posted_at: Utc::now(),
        }
    }
}
