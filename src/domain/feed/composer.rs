use super::error::{FeedServiceError, FetchFailure};
use super::model::Entry;
use rss::{Channel, Guid, Item};

pub const CHANNEL_TITLE_SUFFIX: &str = "turifo";
pub const NO_ERROR: &str = "no error";
pub const CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Most recent first; entries sharing a timestamp fall back to url order
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|entry| std::cmp::Reverse(entry.sort_key()));
}

pub fn channel_description(failures: &[FetchFailure]) -> String {
    if failures.is_empty() {
        return NO_ERROR.to_string();
    }
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sorts the entries and renders the RSS 2.0 document
pub fn compose(
    mut entries: Vec<Entry>,
    failures: &[FetchFailure],
    pattern: &str,
    self_link: &str,
) -> Result<String, FeedServiceError> {
    sort_entries(&mut entries);

    let items: Vec<Item> = entries.into_iter().map(to_item).collect();

    let mut channel = Channel::default();
    channel.set_title(format!("{} - {}", pattern, CHANNEL_TITLE_SUFFIX));
    channel.set_link(self_link.to_string());
    channel.set_description(channel_description(failures));
    channel.set_items(items);

    let bytes = channel
        .write_to(Vec::new())
        .map_err(|e| FeedServiceError::Compose(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FeedServiceError::Compose(e.to_string()))
}

fn to_item(entry: Entry) -> Item {
    // ids are synthesized for uniqueness, not dereferenceable
    let mut guid = Guid::default();
    guid.set_value(entry.id);
    guid.set_permalink(false);

    let mut item = Item::default();
    item.set_title(entry.title);
    item.set_link(entry.url);
    item.set_guid(guid);
    item.set_description(entry.content);
    item.set_pub_date(entry.published_at.to_rfc2822());
    item
}
