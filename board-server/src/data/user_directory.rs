use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::error::DomainError;

pub(crate) const DEFAULT_USER_IDS: [&str; 3] = [
    "11111111-1111-1111-1111-111111111111",
    "22222222-2222-2222-2222-222222222222",
    "33333333-3333-3333-3333-333333333333",
];

/// Answers whether a user id may author posts.
#[async_trait]
pub(crate) trait UserDirectory: Send + Sync {
    async fn contains(&self, user_id: &str) -> Result<bool, DomainError>;
}

#[derive(Debug, Clone)]
pub(crate) struct StaticUserDirectory {
    ids: HashSet<String>,
}

impl StaticUserDirectory {
    pub(crate) fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for StaticUserDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_USER_IDS)
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn contains(&self, user_id: &str) -> Result<bool, DomainError> {
        Ok(self.ids.contains(user_id))
    }
}
