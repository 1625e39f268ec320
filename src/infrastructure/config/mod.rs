use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("turifo/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Settings store; falls back to FILTER_PATTERN / FEED_SOURCES when unset
    pub database_url: Option<String>,
    pub filter_pattern: String,
    pub feed_sources: Vec<String>,
    // Upstream fetching
    pub fetch_timeout_secs: u64,
    pub fetch_concurrency: usize,
    pub user_agent: String,
    pub public_base_url: Option<String>,
    // Collector side channel
    pub collector_url: Option<String>,
    pub collector_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            database_url: optional_var("DATABASE_URL"),
            filter_pattern: env::var("FILTER_PATTERN").unwrap_or_default(),
            feed_sources: env::var("FEED_SOURCES")
                .map(|s| split_sources(&s))
                .unwrap_or_default(),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            fetch_concurrency: env::var("FETCH_CONCURRENCY")
                .unwrap_or_else(|_| "8".to_string())
                .parse()?,
            user_agent: env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            public_base_url: optional_var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            collector_url: optional_var("COLLECTOR_URL"),
            collector_api_key: optional_var("COLLECTOR_API_KEY"),
        };

        if config.fetch_concurrency == 0 {
            return Err("FETCH_CONCURRENCY must be at least 1".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Collector endpoint and key, only when both are configured
    pub fn collector(&self) -> Option<(&str, &str)> {
        match (&self.collector_url, &self.collector_api_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn split_sources(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
