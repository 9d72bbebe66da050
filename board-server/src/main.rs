use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use data::repositories::sqlite::post_repository::SqlitePostRepository;
use data::repositories::sqlite::user_directory::SqliteUserDirectory;
use data::user_directory::{StaticUserDirectory, UserDirectory};
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::{Settings, UserDirectoryKind};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings)?;
    run_migrations(&pool).await?;

    let users = user_directory(&settings, &pool);
    let post_service = PostService::new(SqlitePostRepository::new(pool.clone()), users);
    let state = AppState::new(Arc::new(post_service));

    server::run_http(&settings, state).await?;

    pool.close().await;
    Ok(())
}

fn user_directory(settings: &Settings, pool: &SqlitePool) -> Arc<dyn UserDirectory> {
    match settings.user_directory {
        UserDirectoryKind::Static => {
            info!(
                users = settings.allowed_user_ids.len(),
                "using static user directory"
            );
            Arc::new(StaticUserDirectory::new(
                settings.allowed_user_ids.iter().cloned(),
            ))
        }
        UserDirectoryKind::Table => {
            info!("using users table as user directory");
            Arc::new(SqliteUserDirectory::new(pool.clone()))
        }
    }
}
