use anyhow::{Context, Result};
use clap::Parser;
use postgraph::{telemetry, FetchClient, Pipeline, PostgraphConfig};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Fetch posts, their comments and authors, and print the assembled graph"
)]
struct Args {
    /// API base URL (overrides POSTGRAPH_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
    /// Print the view as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let config = match args.base_url {
        Some(base_url) => PostgraphConfig::new(base_url)?,
        None => PostgraphConfig::from_env()?,
    };
    tracing::info!(base_url = %config.base_url, "starting run");

    let client = FetchClient::http(&config)?;
    let view = match Pipeline::new(client).run().await {
        Ok(view) => view,
        Err(err) => {
            let kind = err.kind();
            tracing::error!(%kind, error = %err, "run aborted");
            return Err(anyhow::Error::new(err).context(format!("run failed ({kind} error)")));
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&view).context("failed to serialize view")?;
        println!("{json}");
    } else {
        print!("{view}");
    }
    Ok(())
}
