use reqwest::{Client, Method, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BoardClientError, BoardClientResult};
use crate::models::Post;

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    user_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResultDto {
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListPostsResponseDto {
    posts: Vec<Post>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `board-server`.
pub(crate) struct HttpClient {
    base_url: Url,
    client: Client,
}

impl HttpClient {
    /// Создаёт HTTP-клиент с базовым URL сервера.
    pub(crate) fn new(base_url: &str) -> BoardClientResult<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            BoardClientError::InvalidRequest(format!("invalid server url '{base_url}': {err}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BoardClientError::InvalidRequest(format!(
                "server url '{base_url}' cannot be a base"
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Каждый сегмент кодируется отдельно, так что `/` в id не меняет маршрут.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn decode_error(response: reqwest::Response) -> BoardClientError {
        let status = response.status();

        let message = match response.json::<ResultDto>().await {
            Ok(body) => body.result,
            Err(_) => None,
        };
        BoardClientError::from_http_status(status, message)
    }

    async fn send<TRes>(&self, request: reqwest::RequestBuilder) -> BoardClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(BoardClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(BoardClientError::from_reqwest)
    }

    async fn create(&self, url: Url, user_id: &str, text: &str) -> BoardClientResult<()> {
        let payload = CreatePostRequestDto { user_id, text };
        let dto: ResultDto = self
            .send(self.client.request(Method::POST, url).json(&payload))
            .await?;

        match dto.result.as_deref() {
            Some("OK") => Ok(()),
            other => Err(BoardClientError::InvalidRequest(format!(
                "unexpected result: {}",
                other.unwrap_or("<missing>")
            ))),
        }
    }

    /// Все посты, новые первыми.
    pub(crate) async fn list_posts(&self) -> BoardClientResult<Vec<Post>> {
        let url = self.endpoint(&["posts"]);
        let dto: ListPostsResponseDto = self.send(self.client.request(Method::GET, url)).await?;
        Ok(dto.posts)
    }

    /// Комментарии к посту, новые первыми.
    pub(crate) async fn list_comments(&self, post_id: &str) -> BoardClientResult<Vec<Post>> {
        let url = self.endpoint(&["posts", post_id, "comments"]);
        self.send(self.client.request(Method::GET, url)).await
    }

    pub(crate) async fn create_post(&self, user_id: &str, text: &str) -> BoardClientResult<()> {
        let url = self.endpoint(&["posts", "create"]);
        self.create(url, user_id, text).await
    }

    pub(crate) async fn create_comment(
        &self,
        post_id: &str,
        user_id: &str,
        text: &str,
    ) -> BoardClientResult<()> {
        let url = self.endpoint(&["posts", post_id, "comments", "create"]);
        self.create(url, user_id, text).await
    }
}
