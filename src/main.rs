use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use turifo::controllers::feed::FeedController;
use turifo::domain::feed::AggregationService;
use turifo::domain::settings::SettingsRepository;
use turifo::infrastructure::collector::HttpEntryCollector;
use turifo::infrastructure::config::{Config, LogFormat};
use turifo::infrastructure::db::{check_connection, create_pool, run_migrations};
use turifo::infrastructure::fetch::ReqwestPageFetcher;
use turifo::infrastructure::http::{build_router, start_http_server};
use turifo::infrastructure::repositories::{PgSettingsRepository, StaticSettingsRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting turifo on {}:{}",
        config.host,
        config.port
    );

    // Settings store: PostgreSQL when configured, environment snapshot otherwise
    let settings_repo: Arc<dyn SettingsRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            check_connection(&pool).await?;
            run_migrations(&pool).await?;
            tracing::info!("Settings store connected and migrated");
            Arc::new(PgSettingsRepository::new(Arc::new(pool)))
        }
        None => {
            tracing::info!(
                sources = config.feed_sources.len(),
                "No DATABASE_URL set, serving settings from the environment"
            );
            Arc::new(StaticSettingsRepository::from_parts(
                &config.filter_pattern,
                config.feed_sources.clone(),
            )?)
        }
    };

    // Upstream HTTP client shared by the fetcher and the collector
    let http_client = reqwest::Client::builder()
        .timeout(config.fetch_timeout())
        .user_agent(config.user_agent.as_str())
        .build()?;
    tracing::info!(
        timeout_secs = config.fetch_timeout_secs,
        concurrency = config.fetch_concurrency,
        "Upstream HTTP client initialized"
    );

    let fetcher = Arc::new(ReqwestPageFetcher::with_client(http_client.clone()));
    let mut aggregation_service =
        AggregationService::new(fetcher).with_concurrency(config.fetch_concurrency);

    match config.collector() {
        Some((endpoint, api_key)) => {
            tracing::info!(endpoint = endpoint, "Collector forwarding enabled");
            aggregation_service = aggregation_service.with_collector(Arc::new(
                HttpEntryCollector::new(endpoint.to_string(), api_key.to_string(), http_client),
            ));
        }
        None => tracing::info!("Collector forwarding disabled"),
    }

    let feed_controller = Arc::new(FeedController::new(
        settings_repo.clone(),
        Arc::new(aggregation_service),
        config.public_base_url.clone(),
    ));

    let config = Arc::new(config);
    let app = build_router(settings_repo, feed_controller);

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "turifo=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "turifo=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
