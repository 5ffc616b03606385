use anyhow::Result;
use clap::{Parser, Subcommand};
use seasonal_jobs::{resolve_jobs_client, start_web_server, SearchQuery, ServerConfig};
use std::net::IpAddr;
use tracing::{error, info};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "seasonal_jobs=info,rocket=warn";

#[derive(Parser)]
#[command(name = "seasonal-jobs")]
#[command(about = "Seasonal job offers with accommodation, from the France Travail API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[arg(long, global = true, env = "ADDRESS", default_value = "0.0.0.0")]
    address: IpAddr,

    #[arg(long, global = true, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Run one search and print the JSON payload
    Search {
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        keywords: Option<String>,
    },
}

fn init_logging(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let jobs_client = resolve_jobs_client()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            start_web_server(cli.address, cli.port, ServerConfig::new(jobs_client)).await
        }
        Command::Search { location, keywords } => {
            let client = match jobs_client {
                Ok(client) => client,
                Err(e) => {
                    error!("{}", e);
                    anyhow::bail!("{}\n{}", e, e.help());
                }
            };

            let query = SearchQuery::new(location, keywords);
            let payload = client.fetch_jobs(&query).await?;
            info!(
                "{} of {} offers mention accommodation",
                payload.stats.with_accommodation, payload.stats.total_found
            );

            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
    }
}
