use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::post::{CreatePostRequest, Post, format_posted_at};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;

/// Body of both create endpoints. Server-owned fields sent by clients are ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub(crate) user_id: String,
    #[serde(default)]
    pub(crate) text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) text: String,
    /// Empty for top-level posts.
    pub(crate) parent_post_id: String,
    pub(crate) comment_count: i64,
    #[schema(example = "2024-05-01 11:20:10.000000")]
    pub(crate) posted_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ResultDto {
    #[schema(example = "OK")]
    pub(crate) result: String,
}

impl ResultDto {
    fn ok() -> Self {
        Self {
            result: "OK".to_string(),
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            posted_at: format_posted_at(post.posted_at),
            id: post.id,
            user_id: post.user_id,
            text: post.text,
            parent_post_id: post.parent_post_id.unwrap_or_default(),
            comment_count: post.comment_count,
        }
    }
}

impl From<CreatePostDto> for CreatePostRequest {
    fn from(dto: CreatePostDto) -> Self {
        Self {
            user_id: dto.user_id,
            text: dto.text,
        }
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts, newest first", body = ListPostsResponseDto),
        (status = 503, description = "Store unavailable"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let posts = state.post_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto {
            posts: posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}/comments",
    tag = "posts",
    params(
        ("post_id" = String, Path, description = "Parent post id")
    ),
    responses(
        (status = 200, description = "Comments of the post, newest first", body = [PostDto]),
        (status = 503, description = "Store unavailable"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let comments = state.post_service.list_comments(&post_id).await?;

    Ok((
        StatusCode::OK,
        Json(comments.into_iter().map(PostDto::from).collect()),
    ))
}

#[utoipa::path(
    post,
    path = "/posts/create",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 200, description = "Post created", body = ResultDto),
        (status = 400, description = "Invalid user id, text or body", body = ResultDto),
        (status = 503, description = "Store unavailable"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ResultDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    state.post_service.create_post(dto.into()).await?;
    Ok((StatusCode::OK, Json(ResultDto::ok())))
}

#[utoipa::path(
    post,
    path = "/posts/{post_id}/comments/create",
    tag = "posts",
    params(
        ("post_id" = String, Path, description = "Parent post id")
    ),
    request_body = CreatePostDto,
    responses(
        (status = 200, description = "Comment created", body = ResultDto),
        (status = 400, description = "Invalid user id, text, body or parent post", body = ResultDto),
        (status = 503, description = "Store unavailable"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ResultDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    state
        .post_service
        .create_comment(&post_id, dto.into())
        .await?;
    Ok((StatusCode::OK, Json(ResultDto::ok())))
}
