use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use ddg_search::api::create_router;
use ddg_search::config::{CONFIG, timeout_from_secs};
use ddg_search::data_models::SafeSearch;
use ddg_search::definition::definition;
use ddg_search::search::SearchClient;

#[derive(Parser, Debug)]
#[command(name = "ddg-search", version, about = "DuckDuckGo search tool")]
struct Cli {
    /// Per-request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// strict, moderate or off
    #[arg(long, global = true)]
    safe_search: Option<SafeSearch>,

    /// Region code for kl/l, e.g. us-en
    #[arg(long, global = true)]
    region: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one search and print the result envelope
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print the tool definition
    Definition,
    /// Serve the tool over HTTP
    Serve {
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stderr so stdout carries only the envelope; also picks up `log` records
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut search_config = CONFIG.search.clone();
    if let Some(secs) = cli.timeout {
        search_config.timeout = timeout_from_secs(secs);
    }
    if let Some(level) = cli.safe_search {
        search_config.safe_search = level;
    }
    if let Some(region) = cli.region {
        search_config.region = region;
    }

    match cli.command {
        Command::Search { query } => {
            let client = SearchClient::new(search_config)?;
            let envelope = client.run(&query.join(" ")).await;
            println!("{}", serde_json::to_string(&envelope)?);
        }
        Command::Definition => {
            println!("{}", serde_json::to_string_pretty(&definition())?);
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| CONFIG.server_addr.clone());
            let client = Arc::new(SearchClient::new(search_config)?);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tracing::info!("listening on {addr}");
            axum::serve(listener, create_router(client))
                .await
                .context("server error")?;
        }
    }
    Ok(())
}
