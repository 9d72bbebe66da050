use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    create_comment, create_post, list_comments, list_posts,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/create", post(create_post))
        .route("/posts/{post_id}/comments", get(list_comments))
        .route("/posts/{post_id}/comments/create", post(create_comment))
}
