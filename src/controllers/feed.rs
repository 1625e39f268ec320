use axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    domain::feed::{composer::CONTENT_TYPE, AggregationService, AggregationServiceApi},
    domain::settings::SettingsRepository,
    error::AppResult,
};

pub struct FeedController {
    settings_repo: Arc<dyn SettingsRepository>,
    aggregation_service: Arc<AggregationService>,
    public_base_url: Option<String>,
}

impl FeedController {
    pub fn new(
        settings_repo: Arc<dyn SettingsRepository>,
        aggregation_service: Arc<AggregationService>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            settings_repo,
            aggregation_service,
            public_base_url,
        }
    }

    /// GET /feed - Aggregated, filtered RSS feed
    pub async fn get_feed(
        State(controller): State<Arc<FeedController>>,
        headers: HeaderMap,
        OriginalUri(uri): OriginalUri,
    ) -> AppResult<Response> {
        // One snapshot for the whole build
        let settings = controller.settings_repo.load().await?;
        let link = self_link(controller.public_base_url.as_deref(), &headers, &uri);

        let feed = controller
            .aggregation_service
            .build_feed(&settings, &link)
            .await?;

        if !feed.failures.is_empty() {
            tracing::warn!(
                failed_sources = feed.failures.len(),
                items = feed.item_count,
                "Serving feed with failed sources"
            );
        }

        Ok(([(header::CONTENT_TYPE, CONTENT_TYPE)], feed.xml).into_response())
    }
}

/// Canonical URL of the feed endpoint as the client addressed it
pub fn self_link(public_base_url: Option<&str>, headers: &HeaderMap, uri: &Uri) -> String {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/feed");

    if let Some(base) = public_base_url {
        return format!("{}{}", base, path);
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    format!("{}://{}{}", scheme, host, path)
}
