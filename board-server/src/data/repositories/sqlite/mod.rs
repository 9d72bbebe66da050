use crate::domain::error::DomainError;

pub(crate) mod post_repository;
pub(crate) mod user_directory;

// Primary SQLite result codes; extended codes keep them in the low byte.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_CANTOPEN: i32 = 14;

pub(crate) fn map_store_error(err: sqlx::Error) -> DomainError {
    let unavailable = match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db_err) => {
            let primary = db_err
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| code & 0xff);
            matches!(
                primary,
                Some(SQLITE_BUSY | SQLITE_LOCKED | SQLITE_CANTOPEN)
            )
        }
        _ => false,
    };

    if unavailable {
        DomainError::StoreUnavailable(err.to_string())
    } else {
        DomainError::Unexpected(err.to_string())
    }
}
