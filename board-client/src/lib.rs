//! Клиентская библиотека для работы с board-server по HTTP.
//!
//! `BoardClient` хранит идентификатор пользователя, от имени которого
//! создаются посты и комментарии, и использует его в операциях записи.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BoardClientError, BoardClientResult};
pub use models::Post;

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент для работы с постами и комментариями board-server.
pub struct BoardClient {
    http_client: HttpClient,
    user_id: Option<String>,
}

impl BoardClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> BoardClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
            user_id: None,
        })
    }

    /// Устанавливает пользователя, от имени которого создаются посты.
    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    /// Возвращает текущего пользователя, если он установлен.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Возвращает все посты (включая комментарии), новые первыми.
    pub async fn list_posts(&self) -> BoardClientResult<Vec<Post>> {
        self.http_client.list_posts().await
    }

    /// Возвращает комментарии к посту, новые первыми.
    ///
    /// Для несуществующего поста возвращается пустой список.
    pub async fn list_comments(&self, post_id: &str) -> BoardClientResult<Vec<Post>> {
        self.http_client.list_comments(post_id).await
    }

    /// Создаёт пост верхнего уровня.
    ///
    /// Требует установленный идентификатор пользователя.
    pub async fn create_post(&self, text: &str) -> BoardClientResult<()> {
        let user_id = self.require_user_id()?;
        self.http_client.create_post(user_id, text).await
    }

    /// Создаёт комментарий к посту `post_id` и увеличивает его `comment_count`.
    ///
    /// Требует установленный идентификатор пользователя.
    pub async fn create_comment(&self, post_id: &str, text: &str) -> BoardClientResult<()> {
        let user_id = self.require_user_id()?;
        self.http_client
            .create_comment(post_id, user_id, text)
            .await
    }

    fn require_user_id(&self) -> BoardClientResult<&str> {
        self.user_id
            .as_deref()
            .ok_or(BoardClientError::MissingUserId)
    }
}
