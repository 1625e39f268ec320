use super::model::Entry;
use async_trait::async_trait;
use std::sync::Arc;

/// External collection endpoint that receives every published entry
#[async_trait]
pub trait EntryCollector: Send + Sync {
    async fn collect(&self, entry: &Entry) -> Result<(), String>;
}

/// Forwards entries one request at a time on a detached task.
///
/// Never awaited by the caller; failures are only logged.
pub fn spawn_forwarding(collector: Arc<dyn EntryCollector>, entries: Vec<Entry>) {
    if entries.is_empty() {
        return;
    }

    tokio::spawn(async move {
        let total = entries.len();
        let mut failed = 0usize;
        for entry in &entries {
            if let Err(e) = collector.collect(entry).await {
                failed += 1;
                tracing::warn!(id = %entry.id, error = %e, "Collector forwarding failed");
            }
        }
        tracing::debug!(total, failed, "Collector forwarding finished");
    });
}
