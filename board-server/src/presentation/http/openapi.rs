use utoipa::OpenApi;

use crate::presentation::http::handlers::posts::{
    CreatePostDto, ListPostsResponseDto, PostDto, ResultDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::list_comments,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::create_comment
    ),
    components(
        schemas(
            CreatePostDto,
            PostDto,
            ListPostsResponseDto,
            ResultDto
        )
    ),
    tags(
        (name = "posts", description = "Posts and threaded comments")
    )
)]
pub(crate) struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_post_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/posts",
            "/posts/create",
            "/posts/{post_id}/comments",
            "/posts/{post_id}/comments/create",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
