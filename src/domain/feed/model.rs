use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::Serialize;

/// One syndication item after repair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub url: String,
    pub id: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub source_title: String,
}

impl Entry {
    /// Total-order key: sortable timestamp text followed by the url
    pub fn sort_key(&self) -> String {
        format!("{}{}", sortable_timestamp(&self.published_at), self.url)
    }

    /// Back to the parser shape, keeping every repaired field
    pub fn into_raw(self) -> RawEntry {
        RawEntry {
            title: self.title,
            url: self.url,
            id: Some(self.id),
            content: self.content,
            published_at: Some(self.published_at),
        }
    }
}

/// Item as read from a source document, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub url: String,
    pub id: Option<String>,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// A parsed source document
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub title: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub entries: Vec<RawEntry>,
}

/// Payload forwarded to the collector side channel
#[derive(Debug, Serialize)]
pub struct CollectedEntry<'a> {
    pub id: &'a str,
    pub published_at: String,
    pub title: &'a str,
    pub url: &'a str,
    pub content: &'a str,
}

impl<'a> From<&'a Entry> for CollectedEntry<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: &entry.id,
            published_at: entry.published_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            title: &entry.title,
            url: &entry.url,
            content: &entry.content,
        }
    }
}

/// Fixed-width UTC text (`YYYY-MM-DDTHH:MM:SSZ`) that sorts like the instant it encodes
pub fn sortable_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Timestamps at or before year zero come from broken upstream dates
pub fn is_valid_timestamp(at: &DateTime<Utc>) -> bool {
    at.year() > 0
}
