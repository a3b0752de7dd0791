use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tn_core::Result;
use tn_sources::NewsAggregator;
use tn_web::AppState;
use tracing::{info, warn};

mod cli;
mod duration;
mod logging;

use cli::{Cli, Commands};

fn build_aggregator(cli: &Cli) -> Result<NewsAggregator> {
    let config = cli.aggregator_config();
    let keys = cli.keys.api_keys();

    let sources = tn_sources::build_sources(cli.pipeline.sources.as_slice(), &config, &keys)?;
    let images = tn_images::create_provider(&cli.image_config())?;
    let cache = tn_storage::create_cache(&cli.cache_config())?;

    for (name, key) in [
        ("newsdata", &keys.newsdata),
        ("newsapi", &keys.newsapi),
    ] {
        if key.is_none() && cli.pipeline.sources.iter().any(|s| s == name) {
            warn!("🔑 No API key for {}, it will return no articles", name);
        }
    }

    let aggregator = NewsAggregator::new(images, cache, config).with_sources(sources);
    let names: Vec<_> = aggregator.sources().iter().map(|m| m.name).collect();
    info!("🦗 Sources: {}", names.join(", "));
    info!("🖼️ Image provider: {}", aggregator.image_provider());
    Ok(aggregator)
}

fn list_sources() {
    println!("News sources:");
    for meta in tn_sources::available_sources() {
        println!("  - {} ({})", meta.cli_name, meta.name);
    }
    println!("Image providers:");
    for name in tn_images::available_providers() {
        println!("  - {}", name);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match &cli.command {
        Commands::Sources => list_sources(),
        Commands::Serve { host, port } => {
            let aggregator = build_aggregator(&cli)?;
            info!("💾 Cache: {} backend, ttl {}s", cli.cache.cache_backend, cli.cache.cache_ttl.0.as_secs());
            tn_web::serve(AppState::new(Arc::new(aggregator)), SocketAddr::new(*host, *port)).await?;
        }
        Commands::Fetch { topic, refresh } => {
            let aggregator = build_aggregator(&cli)?;
            let news = if *refresh {
                aggregator.aggregate(topic).await
            } else {
                aggregator.get_news(topic).await
            };
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "news": news }))?);
        }
    }

    Ok(())
}
