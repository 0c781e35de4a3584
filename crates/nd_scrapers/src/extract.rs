use chrono::{DateTime, Utc};
use nd_core::ArticleRecord;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::sites::{Site, SiteRules};

/// Extract candidate articles from a listing page. One malformed candidate
/// drops only itself; the rest of the page still yields records.
pub fn extract(html: &str, site: Site, now: DateTime<Utc>) -> Vec<ArticleRecord> {
    let rules = site.rules();
    let document = Html::parse_document(html);

    let container = Selector::parse(rules.container_selector).unwrap();
    let title_sel = Selector::parse(rules.title_selector).unwrap();
    let summary_sel = Selector::parse(rules.summary_selector).unwrap();
    let anchor_sel = Selector::parse("a").unwrap();
    let image_sel = Selector::parse("img").unwrap();

    let mut records = Vec::new();
    for element in document.select(&container) {
        match candidate(element, rules, &title_sel, &summary_sel, &anchor_sel, &image_sel, now) {
            Some(record) => records.push(record),
            None => debug!("{}: dropped malformed candidate", rules.source),
        }
    }
    records
}

fn candidate(
    element: ElementRef,
    rules: &SiteRules,
    title_sel: &Selector,
    summary_sel: &Selector,
    anchor_sel: &Selector,
    image_sel: &Selector,
    now: DateTime<Utc>,
) -> Option<ArticleRecord> {
    let title = element
        .select(title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())?;

    let href = element
        .select(anchor_sel)
        .find_map(|a| a.value().attr("href"))?;
    let url = resolve_url(rules.base_url, href)?;

    // A summary node that just repeats the title does not count as one.
    let summary = element
        .select(summary_sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|s| !s.is_empty() && *s != title)
        .unwrap_or_else(|| title.clone());

    let image_url = element
        .select(image_sel)
        .find_map(|img| img.value().attr("src"))
        .map(|src| src.to_string());

    Some(ArticleRecord {
        title,
        summary,
        url,
        image_url,
        source: rules.source.to_string(),
        published_at: now,
    })
}

fn resolve_url(base: &str, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
        <article>
            <h4>Storm hits coast</h4>
            <p>Heavy rain battered the coastline overnight.</p>
            <a href="/world/storm"><img src="https://cdn.example.com/storm.jpg"></a>
        </article>
        <article>
            <h4>Talks resume in capital</h4>
            <a href="https://www.cbsnews.com/world/talks"></a>
        </article>
        </body></html>
    "#;

    #[test]
    fn test_extract_listing() {
        let now = Utc::now();
        let records = extract(LISTING, Site::CbsWorld, now);
        assert_eq!(records.len(), 2);

        let storm = &records[0];
        assert_eq!(storm.title, "Storm hits coast");
        assert_eq!(storm.summary, "Heavy rain battered the coastline overnight.");
        assert_eq!(storm.url, "https://www.cbsnews.com/world/storm");
        assert_eq!(
            storm.image_url.as_deref(),
            Some("https://cdn.example.com/storm.jpg")
        );
        assert_eq!(storm.source, "CBS News");
        assert_eq!(storm.published_at, now);
    }

    #[test]
    fn test_summary_falls_back_to_title() {
        let records = extract(LISTING, Site::CbsWorld, Utc::now());
        let talks = &records[1];
        assert_eq!(talks.summary, talks.title);
    }

    #[test]
    fn test_malformed_candidate_does_not_abort_extraction() {
        let html = r#"
            <article><h4>No link here</h4><p>orphaned</p></article>
            <article>
                <h4>Good story</h4>
                <a href="/world/good"></a>
            </article>
            <article><a href="/world/untitled"></a></article>
        "#;
        let records = extract(html, Site::CbsWorld, Utc::now());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Good story");
    }

    #[test]
    fn test_absolute_hrefs_kept_verbatim() {
        assert_eq!(
            resolve_url("https://www.cbsnews.com", "https://elsewhere.com/a"),
            Some("https://elsewhere.com/a".to_string())
        );
        assert_eq!(
            resolve_url("https://www.cbsnews.com", "/world/x"),
            Some("https://www.cbsnews.com/world/x".to_string())
        );
    }

    #[test]
    fn test_bbc_rules_use_card_selectors() {
        let html = r#"
            <div data-testid="edinburgh-card">
                <h2 data-testid="card-headline">Vote count under way</h2>
                <p data-testid="card-description">Polling stations have closed.</p>
                <a href="/news/world-12345"></a>
            </div>
        "#;
        let records = extract(html, Site::BbcWorld, Utc::now());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://www.bbc.com/news/world-12345");
        assert_eq!(records[0].source, "BBC News");
        assert!(records[0].image_url.is_none());
    }
}
