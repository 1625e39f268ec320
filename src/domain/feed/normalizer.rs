use super::model::{is_valid_timestamp, sortable_timestamp, Entry, ParsedFeed, RawEntry};
use super::rules::{id_strategy_for, IdStrategy};
use chrono::{DateTime, Utc};

/// Repairs every entry of one parsed source and tags it with the feed title.
///
/// `now` is the fallback timestamp when neither the entry nor the feed has a
/// usable date.
pub fn normalize_feed(feed: ParsedFeed, now: DateTime<Utc>) -> Vec<Entry> {
    let ParsedFeed {
        title: feed_title,
        last_updated,
        entries,
    } = feed;

    entries
        .into_iter()
        .map(|raw| normalize_entry(raw, &feed_title, last_updated, now))
        .collect()
}

pub fn normalize_entry(
    raw: RawEntry,
    feed_title: &str,
    feed_updated: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Entry {
    let published_at = raw
        .published_at
        .filter(is_valid_timestamp)
        .or(feed_updated.filter(is_valid_timestamp))
        .unwrap_or(now);

    let id = match raw.id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => synthesize_id(&raw.title, &raw.url, &published_at),
    };

    Entry {
        title: tag_title(raw.title, feed_title),
        url: raw.url,
        id,
        content: raw.content,
        published_at,
        source_title: feed_title.to_string(),
    }
}

fn tag_title(title: String, feed_title: &str) -> String {
    let suffix = format!(" - {}", feed_title);
    if title.ends_with(&suffix) {
        title
    } else {
        title + &suffix
    }
}

fn synthesize_id(title: &str, url: &str, published_at: &DateTime<Utc>) -> String {
    if url.is_empty() {
        return format!("{}{}", title, sortable_timestamp(published_at));
    }

    match id_strategy_for(title) {
        IdStrategy::Url => url.to_string(),
        IdStrategy::UrlWithTimestamp => format!("{}{}", url, sortable_timestamp(published_at)),
    }
}
