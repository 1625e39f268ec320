use super::collector::{spawn_forwarding, EntryCollector};
use super::composer::compose;
use super::enricher::enrich;
use super::error::{FeedServiceError, FetchFailure};
use super::fetcher::{fetch_all, PageFetcher};
use super::filter;
use super::model::Entry;
use super::normalizer::normalize_feed;
use super::parser::parse_document;
use crate::domain::settings::Settings;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

const DEFAULT_CONCURRENCY: usize = 8;

/// Result of one feed build
#[derive(Debug, Clone)]
pub struct ComposedFeed {
    pub xml: String,
    pub item_count: usize,
    pub failures: Vec<FetchFailure>,
}

pub struct AggregationService {
    fetcher: Arc<dyn PageFetcher>,
    collector: Option<Arc<dyn EntryCollector>>,
    concurrency: usize,
}

impl AggregationService {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            collector: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_collector(mut self, collector: Arc<dyn EntryCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

#[async_trait]
pub trait AggregationServiceApi: Send + Sync {
    /// Build the aggregated feed for one request
    ///
    /// This operation:
    /// - Fetches every configured source and waits for all of them
    /// - Normalizes, filters and enriches the merged entries
    /// - Renders the RSS document, listing per-source failures
    /// - Queues collector forwarding without waiting for it
    async fn build_feed(
        &self,
        settings: &Settings,
        self_link: &str,
    ) -> Result<ComposedFeed, FeedServiceError>;
}

#[async_trait]
impl AggregationServiceApi for AggregationService {
    async fn build_feed(
        &self,
        settings: &Settings,
        self_link: &str,
    ) -> Result<ComposedFeed, FeedServiceError> {
        let start_time = std::time::Instant::now();

        let batch = fetch_all(self.fetcher.as_ref(), &settings.sources, self.concurrency).await;
        let mut failures = batch.failures;

        let now = Utc::now();
        let mut merged: Vec<Entry> = Vec::new();
        for (address, body) in batch.documents {
            match parse_document(&body) {
                Ok(feed) => merged.extend(normalize_feed(feed, now)),
                Err(error) => {
                    tracing::warn!(address = %address, error = %error, "Source parse failed");
                    failures.push(FetchFailure::new(address, error));
                }
            }
        }
        let fetched_count = merged.len();

        let kept = filter::apply(merged, &settings.filter);
        let kept_count = kept.len();

        let entries = enrich(kept, self.fetcher.as_ref(), self.concurrency).await;

        // Description order must not depend on fetch completion order
        failures.sort_by(|a, b| a.address.cmp(&b.address));

        let forwarded = self.collector.as_ref().map(|_| entries.clone());
        let xml = compose(entries, &failures, settings.filter.as_str(), self_link)?;

        if let (Some(collector), Some(entries)) = (&self.collector, forwarded) {
            spawn_forwarding(collector.clone(), entries);
        }

        tracing::info!(
            sources = settings.sources.len(),
            failed_sources = failures.len(),
            fetched = fetched_count,
            kept = kept_count,
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Feed built"
        );

        Ok(ComposedFeed {
            xml,
            item_count: kept_count,
            failures,
        })
    }
}
