use chrono::Utc;
use futures_util::future::join_all;
use nd_core::{ArticleRecord, NewsStore, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::sites::{Site, ALL_SITES};
use crate::{extract, filter};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One pipeline context per process: the store handle, a shared HTTP client
/// and a lock per site. No global state.
pub struct Pipeline {
    store: Arc<dyn NewsStore>,
    client: reqwest::Client,
    // Indexed by Site::index(); serializes runs for the same site.
    locks: Vec<Mutex<()>>,
}

impl Pipeline {
    pub fn new(store: Arc<dyn NewsStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        let locks = ALL_SITES.iter().map(|_| Mutex::new(())).collect();
        Ok(Self {
            store,
            client,
            locks,
        })
    }

    /// Fetch, extract, filter and persist one site's listing page.
    ///
    /// Returns the filtered records that were attempted, not the subset that
    /// turned out to be new; callers report scrape counts from this. Every
    /// scrape-domain failure is recovered here, so this never errors: a
    /// fetch failure yields an empty vec and a storage failure still yields
    /// the extracted records.
    pub async fn run(&self, site: Site) -> Vec<ArticleRecord> {
        let _guard = self.locks[site.index()].lock().await;
        let rules = site.rules();

        info!("scraping {}: {}", rules.source, rules.listing_url);
        let html = match self.fetch_listing(rules.listing_url).await {
            Ok(html) => html,
            Err(e) => {
                error!("{}: failed to fetch listing: {}", rules.source, e);
                return Vec::new();
            }
        };

        self.process(site, &html).await
    }

    /// Run every configured site. Different sites run concurrently; the
    /// per-site locks only serialize runs against the same site.
    pub async fn run_all(&self) -> Vec<ArticleRecord> {
        let runs = ALL_SITES.iter().map(|&site| self.run(site));
        join_all(runs).await.into_iter().flatten().collect()
    }

    async fn fetch_listing(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    async fn process(&self, site: Site, html: &str) -> Vec<ArticleRecord> {
        let rules = site.rules();
        let records = filter::apply(extract::extract(html, site, Utc::now()), site);

        match self.store.insert_new(&records).await {
            Ok(saved) => info!(
                "{}: scraped {} items, {} new",
                rules.source,
                records.len(),
                saved
            ),
            Err(e) => error!("{}: failed to save batch: {}", rules.source, e),
        }

        records
    }
}
