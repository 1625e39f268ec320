//! Provider-specific heuristics, kept as lookup tables.
//!
//! Adding a provider means adding a row here; the normalizer and enricher
//! only consult the tables.

/// How to build a missing entry identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    /// The entry url alone
    Url,
    /// Url followed by the sortable publish timestamp. For providers that
    /// reuse stable urls for new posts.
    UrlWithTimestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct IdRule {
    /// Substring of the entry title that identifies the provider
    pub title_marker: &'static str,
    pub strategy: IdStrategy,
}

pub const ID_RULES: &[IdRule] = &[IdRule {
    title_marker: "カンパリ",
    strategy: IdStrategy::UrlWithTimestamp,
}];

/// Where to look for a representative image on a page
#[derive(Debug, Clone, Copy)]
pub struct ImageRule {
    pub selector: &'static str,
    pub attribute: &'static str,
}

/// `og:image` social preview
pub const GENERIC_IMAGE_RULE: ImageRule = ImageRule {
    selector: r#"meta[property="og:image"], meta[name="og:image"]"#,
    attribute: "content",
};

#[derive(Debug, Clone, Copy)]
pub struct HostImageRule {
    /// Matches the host itself and any subdomain
    pub host: &'static str,
    pub rule: ImageRule,
}

/// Catch reports read better with the fishing spot map than with the site banner
pub const HOST_IMAGE_RULES: &[HostImageRule] = &[HostImageRule {
    host: "fishing.ne.jp",
    rule: ImageRule {
        selector: r#"#map img, .map img, .area-map img, img[src*="maps.googleapis.com"]"#,
        attribute: "src",
    },
}];

pub fn id_strategy_for(title: &str) -> IdStrategy {
    ID_RULES
        .iter()
        .find(|rule| title.contains(rule.title_marker))
        .map(|rule| rule.strategy)
        .unwrap_or(IdStrategy::Url)
}

pub fn image_rule_for(host: Option<&str>) -> ImageRule {
    host.and_then(|host| {
        HOST_IMAGE_RULES
            .iter()
            .find(|entry| host_matches(host, entry.host))
    })
    .map(|entry| entry.rule)
    .unwrap_or(GENERIC_IMAGE_RULE)
}

fn host_matches(host: &str, rule_host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == rule_host
        || host
            .strip_suffix(rule_host)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
