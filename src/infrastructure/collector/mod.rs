use crate::domain::feed::model::CollectedEntry;
use crate::domain::feed::{Entry, EntryCollector};
use async_trait::async_trait;

/// Forwards entries to the external collection endpoint as form posts
pub struct HttpEntryCollector {
    endpoint: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl HttpEntryCollector {
    pub fn new(endpoint: String, api_key: String, http_client: reqwest::Client) -> Self {
        Self {
            endpoint,
            api_key,
            http_client,
        }
    }
}

/// `entries` form value: a JSON array holding the one entry
pub fn entries_payload(entry: &Entry) -> Result<String, String> {
    serde_json::to_string(&[CollectedEntry::from(entry)])
        .map_err(|e| format!("Failed to serialize entry: {}", e))
}

#[async_trait]
impl EntryCollector for HttpEntryCollector {
    async fn collect(&self, entry: &Entry) -> Result<(), String> {
        let entries = entries_payload(entry)?;
        let params = [
            ("api_key", self.api_key.as_str()),
            ("entries", entries.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| format!("Collector request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!(
                "Collector responded with status {}",
                response.status().as_u16()
            ));
        }

        Ok(())
    }
}
