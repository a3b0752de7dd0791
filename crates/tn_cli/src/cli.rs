use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tn_core::{AggregatorConfig, ApiKeys};
use tn_images::ImageConfig;
use tn_storage::CacheConfig;

use crate::duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Topic news aggregator", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(flatten)]
    pub cache: CacheArgs,

    #[command(flatten)]
    pub keys: KeyArgs,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "TN_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "TN_HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, env = "TN_PORT", default_value_t = 8000)]
        port: u16,
    },
    /// Print the news for a topic as JSON
    Fetch {
        topic: String,
        /// Ignore the cached snapshot (a fresh one is still written)
        #[arg(long)]
        refresh: bool,
    },
    /// List available news sources and image providers
    Sources,
}

#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// News sources to query, in order
    #[arg(long, env = "TN_SOURCES", value_delimiter = ',', default_values_t = tn_sources::DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect::<Vec<_>>(), global = true)]
    pub sources: Vec<String>,

    /// Image provider: pollinations, unsplash, openai or none
    #[arg(long, env = "TN_IMAGES", default_value = "pollinations", global = true)]
    pub images: String,

    #[arg(long, env = "TN_MAX_ARTICLES", default_value_t = 10, global = true)]
    pub max_articles: usize,

    /// Stories fetched from the trending source
    #[arg(long, env = "TN_TRENDING_LIMIT", default_value_t = 5, global = true)]
    pub trending_limit: usize,

    #[arg(long, env = "TN_IMAGES_PER_ARTICLE", default_value_t = 3, global = true)]
    pub images_per_article: usize,

    /// Timeout for each outbound provider request (e.g. 10s)
    #[arg(long, env = "TN_REQUEST_TIMEOUT", default_value = "10s", global = true)]
    pub request_timeout: HumanDuration,

    #[arg(long, env = "TN_ENRICH_CONCURRENCY", default_value_t = 4, global = true)]
    pub enrich_concurrency: usize,
}

#[derive(Args, Debug)]
pub struct CacheArgs {
    /// Cache backend: file or memory
    #[arg(long, env = "TN_CACHE_BACKEND", default_value = "file", global = true)]
    pub cache_backend: String,

    #[arg(long, env = "TN_CACHE_FILE", default_value = "news_cache.json", global = true)]
    pub cache_file: PathBuf,

    /// How long a snapshot stays valid (e.g. 2m, 24h)
    #[arg(long, env = "TN_CACHE_TTL", default_value = "24h", global = true)]
    pub cache_ttl: HumanDuration,

    /// Serve one snapshot for every topic instead of caching per topic
    #[arg(long, env = "TN_SHARED_CACHE", global = true)]
    pub shared_cache: bool,
}

#[derive(Args)]
pub struct KeyArgs {
    #[arg(long, env = "NEWSDATA_API_KEY", hide_env_values = true, global = true)]
    pub newsdata_api_key: Option<String>,

    #[arg(long, env = "NEWSAPI_API_KEY", hide_env_values = true, global = true)]
    pub newsapi_api_key: Option<String>,

    #[arg(long, env = "UNSPLASH_ACCESS_KEY", hide_env_values = true, global = true)]
    pub unsplash_access_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,
}

impl std::fmt::Debug for KeyArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.api_keys(), f)
    }
}

impl KeyArgs {
    pub fn api_keys(&self) -> ApiKeys {
        ApiKeys {
            newsdata: self.newsdata_api_key.clone(),
            newsapi: self.newsapi_api_key.clone(),
            unsplash: self.unsplash_access_key.clone(),
            openai: self.openai_api_key.clone(),
        }
    }
}

impl Cli {
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            max_articles: self.pipeline.max_articles,
            trending_limit: self.pipeline.trending_limit,
            images_per_article: self.pipeline.images_per_article,
            request_timeout: self.pipeline.request_timeout.0,
            max_concurrent_enrichments: self.pipeline.enrich_concurrency,
        }
    }

    pub fn image_config(&self) -> ImageConfig {
        ImageConfig {
            provider: self.pipeline.images.clone(),
            images_per_article: self.pipeline.images_per_article,
            request_timeout: self.pipeline.request_timeout.0,
            unsplash_key: self.keys.unsplash_access_key.clone(),
            openai_key: self.keys.openai_api_key.clone(),
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            backend: self.cache.cache_backend.clone(),
            path: self.cache.cache_file.clone(),
            ttl: self.cache.cache_ttl.0,
            shared: self.cache.shared_cache,
        }
    }
}
