//! `discogs-listings` — fetch the marketplace listings page for a Discogs release.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Normalize the release identifier ([`models::ReleaseInput`]).
//! 4. Fetch `/sell/release/{id}?limit=250` through the browser client ([`fetcher`], [`client`]).
//! 5. Render the body and summary ([`report`]).
//! 6. Exit `0` on [`models::FetchResult::Ok`], `1` otherwise.

mod cli;
mod client;
mod config;
mod error;
mod fetcher;
mod models;
mod report;

use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, OutputFormat};
use client::BrowserClient;
use config::load_config;
use fetcher::{listings_url, ListingsFetcher};
use models::ReleaseInput;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let input = match &cli.release {
        Some(release) => ReleaseInput::Text(release.clone()),
        None => {
            let mut raw = Vec::new();
            std::io::stdin()
                .read_to_end(&mut raw)
                .context("failed to read release identifier from stdin")?;
            ReleaseInput::Bytes(raw)
        }
    };

    // Validate up front so the summary can show the normalized id
    let release_id = input.normalize()?;

    let client = BrowserClient::from_config(&config.http)?;
    let fetcher = ListingsFetcher::new(client, config.marketplace.base_url);
    let url = listings_url(fetcher.base_url(), release_id);

    let spinner = if !cli.quiet && matches!(cli.format, OutputFormat::Text) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Fetching {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let outcome = fetcher.fetch(release_id.0).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let result = outcome?;

    match cli.format {
        OutputFormat::Text => {
            report::terminal::render(&result, release_id, &url, cli.output.as_deref(), cli.quiet)?;
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    if !result.is_ok() {
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "discogs_listings=debug"
    } else {
        "discogs_listings=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
