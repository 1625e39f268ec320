pub mod collector;
pub mod composer;
pub mod enricher;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod rules;
pub mod service;

pub use collector::EntryCollector;
pub use error::{FeedServiceError, FetchError, FetchFailure};
pub use fetcher::PageFetcher;
pub use model::{Entry, ParsedFeed, RawEntry};
pub use service::{AggregationService, AggregationServiceApi, ComposedFeed};
