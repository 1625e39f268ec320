use super::error::FetchError;
use super::model::{ParsedFeed, RawEntry};
use chrono::{DateTime, Utc};

/// Parses one source document.
///
/// RSS 2.0 is tried first since it keeps absent guids and dates visible;
/// Atom and JSON Feed documents go through `feed-rs`.
pub fn parse_document(bytes: &[u8]) -> Result<ParsedFeed, FetchError> {
    if let Ok(channel) = rss::Channel::read_from(bytes) {
        return Ok(from_rss(&channel));
    }

    // Missing ids stay empty so the normalizer synthesizes them
    let parser = feed_rs::parser::Builder::new()
        .id_generator(|_, _, _| String::new())
        .build();

    match parser.parse(bytes) {
        Ok(feed) => Ok(from_feed_rs(feed)),
        Err(e) => {
            tracing::debug!(error = %e, "Document is neither RSS nor Atom");
            Err(FetchError::Unparsable)
        }
    }
}

fn from_rss(channel: &rss::Channel) -> ParsedFeed {
    let channel_dc_date = channel
        .dublin_core_ext()
        .and_then(|dc| dc.dates().first().map(String::as_str));
    let last_updated = channel
        .last_build_date()
        .or(channel.pub_date())
        .or(channel_dc_date)
        .and_then(parse_timestamp);

    let entries = channel
        .items()
        .iter()
        .map(|item| {
            let dc_date = item
                .dublin_core_ext()
                .and_then(|dc| dc.dates().first().map(String::as_str));

            RawEntry {
                title: item.title().unwrap_or_default().to_string(),
                url: item.link().unwrap_or_default().trim().to_string(),
                id: item
                    .guid()
                    .map(|guid| guid.value().trim().to_string())
                    .filter(|id| !id.is_empty()),
                content: item
                    .content()
                    .or(item.description())
                    .unwrap_or_default()
                    .to_string(),
                published_at: item.pub_date().or(dc_date).and_then(parse_timestamp),
            }
        })
        .collect();

    ParsedFeed {
        title: channel.title().to_string(),
        last_updated,
        entries,
    }
}

fn from_feed_rs(feed: feed_rs::model::Feed) -> ParsedFeed {
    let entries = feed
        .entries
        .into_iter()
        .map(|entry| {
            let content = entry
                .content
                .and_then(|c| c.body)
                .or_else(|| entry.summary.map(|s| s.content))
                .unwrap_or_default();
            let id = entry.id.trim().to_string();

            RawEntry {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                url: entry
                    .links
                    .first()
                    .map(|link| link.href.clone())
                    .unwrap_or_default(),
                id: (!id.is_empty()).then_some(id),
                content,
                published_at: entry.published.or(entry.updated),
            }
        })
        .collect();

    ParsedFeed {
        title: feed.title.map(|t| t.content).unwrap_or_default(),
        last_updated: feed.updated,
        entries,
    }
}

/// RFC 2822 as RSS requires, RFC 3339 as `dc:date` uses
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
