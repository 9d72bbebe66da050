use std::process;

use anyhow::Result;
use board_client::{BoardClient, BoardClientError, Post};
use clap::{Parser, Subcommand};

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "board-cli", version, about = "CLI клиент для board-server")]
struct Cli {
    /// Адрес HTTP-сервера.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Пользователь, от имени которого создаются посты.
    #[arg(long, global = true, env = "BOARD_USER_ID")]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список всех постов, новые первыми.
    List,
    /// Комментарии к посту.
    Comments {
        #[arg(long)]
        post_id: String,
    },
    /// Создание поста (требует --user-id или BOARD_USER_ID).
    Create {
        #[arg(long)]
        text: String,
    },
    /// Создание комментария к посту (требует --user-id или BOARD_USER_ID).
    Comment {
        #[arg(long)]
        post_id: String,
        #[arg(long)]
        text: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string()));
    let mut client = BoardClient::new(&server).map_err(map_client_error)?;
    if let Some(user_id) = cli.user_id.as_deref().and_then(parse_user_id) {
        client.set_user_id(user_id);
    }

    match cli.command {
        Command::List => {
            let posts = client.list_posts().await.map_err(map_client_error)?;
            print_posts("Постов", &posts);
        }
        Command::Comments { post_id } => {
            let comments = client
                .list_comments(&post_id)
                .await
                .map_err(map_client_error)?;
            print_posts("Комментариев", &comments);
        }
        Command::Create { text } => {
            client.create_post(&text).await.map_err(map_client_error)?;
            println!("Пост создан");
        }
        Command::Comment { post_id, text } => {
            client
                .create_comment(&post_id, &text)
                .await
                .map_err(map_client_error)?;
            println!("Комментарий к посту {post_id} создан");
        }
    }

    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_user_id(raw: &str) -> Option<String> {
    let user_id = raw.trim();
    if user_id.is_empty() {
        return None;
    }
    Some(user_id.to_string())
}

fn map_client_error(err: BoardClientError) -> anyhow::Error {
    let message = match err {
        BoardClientError::MissingUserId => {
            "не указан пользователь: передайте --user-id или задайте BOARD_USER_ID".to_string()
        }
        BoardClientError::NotFound => "ресурс не найден".to_string(),
        BoardClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BoardClientError::Unavailable(message) => format!("сервер недоступен: {message}"),
        BoardClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_posts(title: &str, posts: &[Post]) {
    println!("{title}: {}", posts.len());

    for post in posts {
        let kind = if post.is_comment() { "↳" } else { "-" };
        println!(
            "{kind} [{}] {} (user_id={}, comments={}, posted_at={})",
            post.id, post.text, post.user_id, post.comment_count, post.posted_at
        );
    }
}
