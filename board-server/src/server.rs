use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http::{
    self,
    middleware::{cors::apply_cors, limits::apply_limits, trace::apply_trace},
    openapi::ApiDoc,
};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    http::routes(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    use super::build_router;
    use crate::application::post_service::PostService;
    use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;
    use crate::data::repositories::sqlite::user_directory::SqliteUserDirectory;
    use crate::data::user_directory::{StaticUserDirectory, UserDirectory};
    use crate::infrastructure::database::test_pool;
    use crate::presentation::AppState;

    const ALICE: &str = "11111111-1111-1111-1111-111111111111";

    fn app_with(pool: SqlitePool, users: Arc<dyn UserDirectory>) -> Router {
        let service = PostService::new(SqlitePostRepository::new(pool), users);
        build_router(AppState::new(Arc::new(service)))
    }

    async fn app() -> Router {
        app_with(test_pool().await, Arc::new(StaticUserDirectory::default()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body must be json")
        };
        (status, body)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("request must build");
        send(app, request).await
    }

    async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request must build");
        send(app, request).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(app, uri, &body.to_string()).await
    }

    async fn list_posts(app: &Router) -> Vec<Value> {
        let (status, body) = get(app, "/posts").await;
        assert_eq!(status, StatusCode::OK);
        body["posts"].as_array().expect("posts array").clone()
    }

    #[tokio::test]
    async fn post_and_comment_scenario() {
        let app = app().await;

        let (status, body) = post_json(
            &app,
            "/posts/create",
            json!({ "user_id": ALICE, "text": "hello" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "OK" }));

        let posts = list_posts(&app).await;
        assert_eq!(posts.len(), 1);
        let post_a = &posts[0];
        assert_eq!(post_a["text"], "hello");
        assert_eq!(post_a["user_id"], ALICE);
        assert_eq!(post_a["parent_post_id"], "");
        assert_eq!(post_a["comment_count"], 0);
        let post_a_id = post_a["id"].as_str().expect("id string").to_string();

        let (status, body) = post_json(
            &app,
            &format!("/posts/{post_a_id}/comments/create"),
            json!({ "user_id": ALICE, "text": "hi" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "OK" }));

        let (status, comments) = get(&app, &format!("/posts/{post_a_id}/comments")).await;
        assert_eq!(status, StatusCode::OK);
        let comments = comments.as_array().expect("comments array");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["text"], "hi");
        assert_eq!(comments[0]["parent_post_id"], post_a_id.as_str());
        assert_eq!(comments[0]["comment_count"], 0);

        let posts = list_posts(&app).await;
        let post_a = posts
            .iter()
            .find(|post| post["id"] == post_a_id.as_str())
            .expect("post A listed");
        assert_eq!(post_a["comment_count"], 1);
    }

    #[tokio::test]
    async fn newer_posts_are_listed_first() {
        let app = app().await;
        for text in ["first", "second", "third"] {
            let (status, _) = post_json(
                &app,
                "/posts/create",
                json!({ "user_id": ALICE, "text": text }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let texts: Vec<String> = list_posts(&app)
            .await
            .iter()
            .map(|post| post["text"].as_str().expect("text").to_string())
            .collect();
        assert_eq!(texts, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn invalid_text_is_rejected_and_not_stored() {
        let app = app().await;

        for text in [String::new(), "x".repeat(101)] {
            let (status, body) = post_json(
                &app,
                "/posts/create",
                json!({ "user_id": ALICE, "text": text }),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["result"].as_str().expect("message").contains("text"));
        }
        assert!(list_posts(&app).await.is_empty());
    }

    #[tokio::test]
    async fn unknown_user_is_rejected_and_not_stored() {
        let app = app().await;

        let (status, body) = post_json(
            &app,
            "/posts/create",
            json!({ "user_id": "44444444-4444-4444-4444-444444444444", "text": "hello" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["result"], "invalid user id");
        assert!(list_posts(&app).await.is_empty());
    }

    #[tokio::test]
    async fn missing_fields_and_broken_json_are_bad_requests() {
        let app = app().await;

        let (status, _) = post_json(&app, "/posts/create", json!({ "user_id": ALICE })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post_raw(&app, "/posts/create", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["result"].is_string());

        assert!(list_posts(&app).await.is_empty());
    }

    #[tokio::test]
    async fn comment_on_missing_parent_is_rejected() {
        let app = app().await;

        let (status, body) = post_json(
            &app,
            "/posts/does-not-exist/comments/create",
            json!({ "user_id": ALICE, "text": "hi" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["result"], "invalid parent post id: does-not-exist");
        assert!(list_posts(&app).await.is_empty());
    }

    #[tokio::test]
    async fn comments_listing_excludes_other_posts() {
        let app = app().await;
        post_json(
            &app,
            "/posts/create",
            json!({ "user_id": ALICE, "text": "parent" }),
        )
        .await;
        post_json(
            &app,
            "/posts/create",
            json!({ "user_id": ALICE, "text": "unrelated" }),
        )
        .await;
        let parent_id = list_posts(&app)
            .await
            .iter()
            .find(|post| post["text"] == "parent")
            .and_then(|post| post["id"].as_str().map(str::to_string))
            .expect("parent listed");

        for text in ["c1", "c2"] {
            let (status, _) = post_json(
                &app,
                &format!("/posts/{parent_id}/comments/create"),
                json!({ "user_id": ALICE, "text": text }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, comments) = get(&app, &format!("/posts/{parent_id}/comments")).await;
        let texts: Vec<&str> = comments
            .as_array()
            .expect("comments array")
            .iter()
            .map(|post| post["text"].as_str().expect("text"))
            .collect();
        assert_eq!(texts, ["c2", "c1"]);

        let (status, empty) = get(&app, "/posts/unknown/comments").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty, json!([]));
    }

    #[tokio::test]
    async fn client_supplied_server_fields_are_ignored() {
        let app = app().await;

        let (status, _) = post_json(
            &app,
            "/posts/create",
            json!({
                "id": "chosen-by-client",
                "user_id": ALICE,
                "text": "hello",
                "parent_post_id": "elsewhere",
                "comment_count": 42,
                "posted_at": "2018-05-01 11:20:10"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let posts = list_posts(&app).await;
        assert_ne!(posts[0]["id"], "chosen-by-client");
        assert_eq!(posts[0]["parent_post_id"], "");
        assert_eq!(posts[0]["comment_count"], 0);
        assert_ne!(posts[0]["posted_at"], "2018-05-01 11:20:10");
    }

    #[tokio::test]
    async fn table_backed_directory_checks_users_table() {
        let pool = test_pool().await;
        let app = app_with(pool.clone(), Arc::new(SqliteUserDirectory::new(pool.clone())));

        let (status, _) = post_json(
            &app,
            "/posts/create",
            json!({ "user_id": "dave", "text": "hello" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        sqlx::query("INSERT INTO users (id) VALUES (?1)")
            .bind("dave")
            .execute(&pool)
            .await
            .expect("insert user");

        let (status, _) = post_json(
            &app,
            "/posts/create",
            json!({ "user_id": "dave", "text": "hello" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn closed_store_yields_service_unavailable() {
        let pool = test_pool().await;
        let app = app_with(pool.clone(), Arc::new(StaticUserDirectory::default()));
        pool.close().await;

        let (status, body) = get(&app, "/posts").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["result"], "store unavailable");

        let (status, _) = post_json(
            &app,
            "/posts/create",
            json!({ "user_id": ALICE, "text": "hello" }),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn health_and_unknown_routes() {
        let app = app().await;

        let (status, body) = get(&app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));

        let (status, body) = get(&app, "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "result": "not found" }));
    }
}
