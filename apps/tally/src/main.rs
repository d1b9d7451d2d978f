use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use dotenv::dotenv;
use tally_shared_models::FollowerRecord;
use tally_store::{read_record, write_record};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod collector;
mod config;
mod fetcher;

use collector::collect_followers;
use config::{Args, Config};
use fetcher::build_fetchers;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(config: &Config) -> anyhow::Result<FollowerRecord> {
    let previous = read_record(&config.output);
    let fetchers = build_fetchers(config)?;

    info!(
        platforms = fetchers.len(),
        output = %config.output.display(),
        "collecting follower counts"
    );

    collect_followers(&fetchers, &previous, Utc::now()).await
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = Config::load(&args)?;

    let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let record = rt.block_on(run(&config))?;

    if config.dry_run {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    write_record(&config.output, &record)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    println!(
        "Wrote {}: {}",
        config.output.display(),
        serde_json::to_string(&record)?
    );

    Ok(())
}
