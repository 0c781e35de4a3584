use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use crate::pipeline::Pipeline;
use crate::sites::ALL_SITES;

/// Spawn one recurring scrape task per site. Each timer is independent and
/// fires immediately on spawn, then every `interval`. The pipeline's
/// per-site lock keeps an overlapping manual trigger from racing these.
pub fn spawn(pipeline: Arc<Pipeline>, interval: Duration) -> Vec<JoinHandle<()>> {
    ALL_SITES
        .iter()
        .map(|&site| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                info!("scheduling {} every {:?}", site, interval);
                let mut timer = tokio::time::interval(interval);
                loop {
                    timer.tick().await;
                    pipeline.run(site).await;
                }
            })
        })
        .collect()
}
