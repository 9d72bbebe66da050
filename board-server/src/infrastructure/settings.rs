use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

use crate::data::user_directory::DEFAULT_USER_IDS;

const DEFAULT_DATABASE_URL: &str = "sqlite://post.sqlite3?mode=rwc";

/// Where the set of users allowed to post comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDirectoryKind {
    /// Fixed list from `ALLOWED_USER_IDS`.
    Static,
    /// Rows of the `users` table.
    Table,
}

impl FromStr for UserDirectoryKind {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "table" => Ok(Self::Table),
            other => Err(anyhow!(
                "unknown USER_DIRECTORY '{other}', expecting 'static' or 'table'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout_secs: u64,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub user_directory: UserDirectoryKind,
    pub allowed_user_ids: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let database_max_connections = parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;
        let database_acquire_timeout_secs =
            parse_positive(&lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?;

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_list(
            &lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256)?;

        let user_directory = match lookup("USER_DIRECTORY") {
            Some(raw) => raw.parse()?,
            None => UserDirectoryKind::Static,
        };
        let allowed_user_ids = match lookup("ALLOWED_USER_IDS") {
            Some(raw) => parse_list(&raw),
            None => DEFAULT_USER_IDS.iter().map(|id| id.to_string()).collect(),
        };
        if user_directory == UserDirectoryKind::Static && allowed_user_ids.is_empty() {
            return Err(anyhow!("ALLOWED_USER_IDS must list at least one user id"));
        }

        Ok(Self {
            database_url,
            database_max_connections,
            database_acquire_timeout_secs,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            user_directory,
            allowed_user_ids,
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Default + PartialEq + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?,
        None => default,
    };

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Settings, UserDirectoryKind};
    use crate::data::user_directory::DEFAULT_USER_IDS;

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let settings = settings_from(&[]).expect("defaults must be valid");

        assert_eq!(settings.database_url, "sqlite://post.sqlite3?mode=rwc");
        assert_eq!(settings.http_addr, "0.0.0.0:8080");
        assert_eq!(settings.database_max_connections, 5);
        assert_eq!(settings.http_concurrency_limit, 256);
        assert_eq!(settings.user_directory, UserDirectoryKind::Static);
        assert_eq!(settings.allowed_user_ids, DEFAULT_USER_IDS);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = settings_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("USER_DIRECTORY", "Table"),
            ("ALLOWED_USER_IDS", " a , b ,, "),
            ("CORS_ORIGINS", "*"),
            ("RUST_LOG", "debug"),
        ])
        .expect("settings must be valid");

        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.user_directory, UserDirectoryKind::Table);
        assert_eq!(settings.allowed_user_ids, ["a", "b"]);
        assert_eq!(settings.cors_origins, ["*"]);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn zero_and_garbage_limits_are_rejected() {
        assert!(settings_from(&[("HTTP_CONCURRENCY_LIMIT", "0")]).is_err());
        assert!(settings_from(&[("DATABASE_MAX_CONNECTIONS", "many")]).is_err());
    }

    #[test]
    fn unknown_user_directory_is_rejected() {
        assert!(settings_from(&[("USER_DIRECTORY", "ldap")]).is_err());
    }

    #[test]
    fn static_directory_requires_ids() {
        assert!(settings_from(&[("ALLOWED_USER_IDS", " , ")]).is_err());
        assert!(
            settings_from(&[("ALLOWED_USER_IDS", ""), ("USER_DIRECTORY", "table")]).is_ok()
        );
    }
}
