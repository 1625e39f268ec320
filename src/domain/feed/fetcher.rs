use super::error::{FetchError, FetchFailure};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};

/// Retrieves raw documents over the network.
///
/// Implementations issue a single GET per call with no retry and map every
/// failure onto a [`FetchError`] reason.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Outcome of one fan-out, split into unordered successes and failures
#[derive(Debug, Default)]
pub struct FetchBatch {
    pub documents: Vec<(String, Vec<u8>)>,
    pub failures: Vec<FetchFailure>,
}

/// Fetches every address concurrently, at most `concurrency` at a time.
///
/// Returns once all addresses have resolved; one failure never cancels the
/// others. Results arrive in completion order.
pub async fn fetch_all(
    fetcher: &dyn PageFetcher,
    addresses: &[String],
    concurrency: usize,
) -> FetchBatch {
    let results: Vec<(String, Result<Vec<u8>, FetchError>)> = stream::iter(addresses.to_vec())
        .map(|address| async move {
            let result = fetcher.fetch(&address).await;
            (address, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut batch = FetchBatch::default();
    for (address, result) in results {
        match result {
            Ok(body) => batch.documents.push((address, body)),
            Err(error) => {
                tracing::warn!(address = %address, error = %error, "Source fetch failed");
                batch.failures.push(FetchFailure::new(address, error));
            }
        }
    }
    batch
}
