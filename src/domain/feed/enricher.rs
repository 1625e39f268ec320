use super::fetcher::PageFetcher;
use super::model::Entry;
use super::rules::{image_rule_for, ImageRule};
use futures::stream::{self, StreamExt};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static INLINE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img[\s/>]").expect("inline image pattern compiles"));

pub fn has_inline_image(content: &str) -> bool {
    INLINE_IMAGE.is_match(content)
}

/// Prepends a representative image to every entry that has none.
///
/// Pages are fetched concurrently, at most `concurrency` at a time, and the
/// call returns after all of them resolved. Failures leave the entry as is.
pub async fn enrich(
    mut entries: Vec<Entry>,
    fetcher: &dyn PageFetcher,
    concurrency: usize,
) -> Vec<Entry> {
    let pending: Vec<(usize, String)> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| !has_inline_image(&entry.content) && !entry.url.is_empty())
        .map(|(index, entry)| (index, entry.url.clone()))
        .collect();

    if pending.is_empty() {
        return entries;
    }

    let found: Vec<(usize, Option<String>)> = stream::iter(pending)
        .map(|(index, url)| async move {
            let image = match fetcher.fetch(&url).await {
                Ok(body) => extract_image(&String::from_utf8_lossy(&body), &url),
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "Image lookup fetch failed");
                    None
                }
            };
            (index, image)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut enriched = 0usize;
    for (index, image) in found {
        if let Some(src) = image {
            let entry = &mut entries[index];
            entry.content = format!(r#"<img src="{}">{}"#, escape_attribute(&src), entry.content);
            enriched += 1;
        }
    }
    tracing::debug!(enriched, "Image enrichment finished");

    entries
}

/// Finds the image address for a page, resolved against the page url
pub fn extract_image(html: &str, page_url: &str) -> Option<String> {
    let base = Url::parse(page_url).ok();
    let rule = image_rule_for(base.as_ref().and_then(Url::host_str));
    let raw = select_attribute(html, rule)?;

    match &base {
        Some(base) => base.join(&raw).ok().map(String::from),
        None => Some(raw),
    }
}

fn select_attribute(html: &str, rule: ImageRule) -> Option<String> {
    let selector = match Selector::parse(rule.selector) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::warn!(selector = rule.selector, error = %e, "Invalid image selector");
            return None;
        }
    };

    let document = Html::parse_document(html);
    let value = document
        .select(&selector)
        .filter_map(|element| element.value().attr(rule.attribute))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string);
    value
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
