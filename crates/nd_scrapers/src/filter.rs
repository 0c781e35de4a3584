use nd_core::ArticleRecord;
use tracing::debug;

use crate::sites::{Site, SiteRules};

/// Apply the site's validity rules. Runs after extraction and before any
/// store lookup, so rejected candidates cost no I/O.
pub fn apply(records: Vec<ArticleRecord>, site: Site) -> Vec<ArticleRecord> {
    let rules = site.rules();
    records
        .into_iter()
        .filter(|record| keep(record, rules))
        .collect()
}

fn keep(record: &ArticleRecord, rules: &SiteRules) -> bool {
    if record.title.chars().count() < rules.min_title_len {
        debug!("{}: title too short, rejected: {:?}", rules.source, record.title);
        return false;
    }
    if let Some(term) = rules
        .excluded_url_terms
        .iter()
        .find(|term| record.url.contains(**term))
    {
        debug!("{}: url matches {:?}, rejected: {}", rules.source, term, record.url);
        return false;
    }
    if let Some(term) = rules
        .excluded_title_terms
        .iter()
        .find(|term| record.title.contains(**term))
    {
        debug!("{}: title matches {:?}, rejected: {}", rules.source, term, record.title);
        return false;
    }
    true
}
