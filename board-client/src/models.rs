use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель поста или комментария.
pub struct Post {
    /// Идентификатор (UUID).
    pub id: String,
    /// Идентификатор автора.
    pub user_id: String,
    /// Текст, от 1 до 100 символов.
    pub text: String,
    /// Идентификатор родительского поста; пустая строка у постов верхнего уровня.
    pub parent_post_id: String,
    /// Количество прямых комментариев.
    pub comment_count: i64,
    /// Время публикации в формате `YYYY-MM-DD HH:MM:SS.ffffff` (UTC).
    pub posted_at: String,
}

impl Post {
    /// `true`, если это комментарий к другому посту.
    pub fn is_comment(&self) -> bool {
        !self.parent_post_id.is_empty()
    }
}
