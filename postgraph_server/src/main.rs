use anyhow::{Context, Result};
use clap::Parser;
use postgraph_server::{router, serve, Dataset};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Demo JSON API serving posts, comments and authors")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 9999)]
    port: u16,
    /// JSON file with `posts`, `comments` and `authors` arrays (defaults to the built-in feed)
    #[arg(long)]
    fixture: Option<PathBuf>,
    /// Delay added to every `/slow/` route, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,postgraph_server=debug")),
        )
        .init();

    let args = Args::parse();
    let dataset = match &args.fixture {
        Some(path) => Dataset::load(path)?,
        None => Dataset::seed(),
    };
    tracing::info!(
        posts = dataset.posts.len(),
        comments = dataset.comments.len(),
        authors = dataset.authors.len(),
        "dataset loaded"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    serve(listener, router(dataset, Duration::from_millis(args.delay_ms))).await
}
