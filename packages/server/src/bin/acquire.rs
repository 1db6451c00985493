//! CLI for running an acquisition job once
//!
//! Uses the same configuration and response bodies as the HTTP server and
//! prints the body as JSON. Exits non-zero when the job failed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use server_core::config::Config;
use server_core::kernel::ServerDeps;
use server_core::server::routes::{rehost_images, scrape_category, ScrapeCategoryRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "acquire")]
#[command(about = "Run a vehicle content acquisition job")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect vehicle detail URLs from a listing category
    ScrapeCategory {
        url: String,
        /// Maximum number of URLs to return
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Copy proxied vehicle images into owned storage
    RehostImages,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,acquisition=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let deps = ServerDeps::from_config(&config);

    let succeeded = match cli.command {
        Commands::ScrapeCategory { url, limit } => {
            let (status, body) = scrape_category(&deps, ScrapeCategoryRequest { url, limit }).await;
            print_json(&body)?;
            status.is_success()
        }
        Commands::RehostImages => {
            let (status, body) = rehost_images(&deps).await;
            print_json(&body)?;
            status.is_success()
        }
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}
