use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `board-client`.
pub enum BoardClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Не задан идентификатор пользователя для создания постов.
    #[error("user id is not set")]
    MissingUserId,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос: неизвестный пользователь, неверный текст или родительский пост.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Хранилище сервера временно недоступно.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Результат операций `board-client`.
pub type BoardClientResult<T> = Result<T, BoardClientError>;

impl BoardClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::SERVICE_UNAVAILABLE => Self::Unavailable(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
