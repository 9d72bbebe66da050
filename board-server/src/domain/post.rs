use chrono::{DateTime, NaiveDateTime, Utc};

use super::error::DomainError;

pub(crate) const TEXT_MAX_CHARS: usize = 100;

/// Wire and storage format of `posted_at`. Zero-padded, so lexical order is chronological.
pub(crate) const POSTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A post or, when `parent_post_id` is set, a comment on another post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    pub(crate) id: String,
    pub(crate) user_id: String,
    pub(crate) text: String,
    pub(crate) parent_post_id: Option<String>,
    pub(crate) comment_count: i64,
    pub(crate) posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) user_id: String,
    pub(crate) text: String,
}

impl CreatePostRequest {
    pub(crate) fn validate_text(self) -> Result<Self, DomainError> {
        validate_text(&self.text)?;
        Ok(self)
    }
}

impl Post {
    pub(crate) fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
        parent_post_id: Option<String>,
        comment_count: i64,
        posted_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let id = require_non_empty("id", id.into())?;
        let user_id = require_non_empty("user_id", user_id.into())?;
        let text = text.into();
        validate_text(&text)?;

        if comment_count < 0 {
            return Err(DomainError::Validation {
                field: "comment_count",
                message: "must be >= 0",
            });
        }

        Ok(Self {
            id,
            user_id,
            text,
            parent_post_id: parent_post_id.filter(|parent| !parent.is_empty()),
            comment_count,
            posted_at,
        })
    }
}

pub(crate) fn validate_text(text: &str) -> Result<(), DomainError> {
    let len = text.chars().count();
    if len == 0 || len > TEXT_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "text",
            message: "must be 1..100 chars",
        });
    }
    Ok(())
}

pub(crate) fn format_posted_at(posted_at: DateTime<Utc>) -> String {
    posted_at.format(POSTED_AT_FORMAT).to_string()
}

pub(crate) fn parse_posted_at(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    NaiveDateTime::parse_from_str(raw, POSTED_AT_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| DomainError::Unexpected(format!("malformed posted_at '{raw}': {err}")))
}

fn require_non_empty(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(value)
}
