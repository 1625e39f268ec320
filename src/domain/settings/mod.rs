pub mod error;

pub use error::SettingsError;

use crate::error::AppResult;
use async_trait::async_trait;
use regex::Regex;

/// User-configured filtering rule: the pattern text plus its compiled form.
///
/// Only constructible through [`FilterSpec::parse`], so the pipeline never
/// sees an invalid pattern.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    source: String,
    regex: Regex,
}

impl FilterSpec {
    pub fn parse(source: &str) -> Result<Self, SettingsError> {
        let regex =
            Regex::new(source).map_err(|e| SettingsError::InvalidPattern(e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Pattern that keeps every entry
    pub fn match_all() -> Self {
        Self {
            source: String::new(),
            regex: Regex::new("").expect("empty pattern always compiles"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Immutable configuration snapshot for one feed build
#[derive(Debug, Clone)]
pub struct Settings {
    pub filter: FilterSpec,
    pub sources: Vec<String>,
}

impl Settings {
    pub fn new(filter: FilterSpec, sources: Vec<String>) -> Self {
        Self { filter, sources }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(FilterSpec::match_all(), Vec::new())
    }
}

/// Read side of the configuration store
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load a consistent snapshot of the current settings
    async fn load(&self) -> AppResult<Settings>;

    /// Whether the backing store is reachable
    async fn check(&self) -> bool;
}
