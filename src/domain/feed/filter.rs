use super::model::Entry;
use crate::domain::settings::FilterSpec;

/// Keeps entries whose `title + content` matches the filter
pub fn apply(entries: Vec<Entry>, filter: &FilterSpec) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|entry| filter.is_match(&format!("{}{}", entry.title, entry.content)))
        .collect()
}
