use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::agent::RunOutcome;
use crate::analysis::{aggregate, filter};
use crate::config::Config;
use crate::crawler::{self, fetcher};
use crate::normalize::{self, Currency, NormalizedListing};
use crate::query;
use crate::storage::blob::BlobStore;

/// All aggregation happens in Ghanaian cedis.
const REFERENCE_CURRENCY: Currency = Currency::Ghs;

pub const RAW_NAMESPACE: &str = "raw_listings";
pub const PROCESSED_NAMESPACE: &str = "processed_listings";

/// Runs the full query pipeline: parse, discover, extract, normalize,
/// persist, filter, aggregate.
pub struct RentalAgent {
    cfg: Config,
    client: reqwest::Client,
    store: Option<BlobStore>,
}

impl RentalAgent {
    pub fn new(cfg: Config) -> Self {
        let client = fetcher::build_client(Duration::from_secs(cfg.request_timeout_secs));
        let store = cfg.data_dir.clone().map(BlobStore::new);
        Self { cfg, client, store }
    }

    pub async fn answer(&self, query_text: &str) -> RunOutcome {
        info!(query = query_text, "starting rental query run");

        let entities = query::parse(query_text);
        if !entities.is_actionable() {
            warn!(query = query_text, "query carried no usable entities");
            return RunOutcome::error(
                "Could not understand key details. \
                 Please mention a location, a bedroom count, or a property type.",
            );
        }

        let sources = crawler::discover_sources(&self.cfg, &entities);
        if sources.is_empty() {
            return RunOutcome::error("Could not identify any listing sources for your query.");
        }

        let mut raw = Vec::new();
        for (i, url) in sources.iter().enumerate() {
            if i > 0 {
                sleep(Duration::from_millis(self.cfg.delay_ms)).await;
            }
            match crawler::extract(&self.client, url).await {
                Ok(batch) => raw.extend(batch),
                Err(e) => warn!(url = %url, error = %e, "source failed, skipping"),
            }
        }

        let mut stored = BTreeMap::new();
        let dataset: Vec<NormalizedListing> = if raw.is_empty() {
            warn!("extraction yielded no listings, falling back to persisted data");
            match self.load_fallback().await {
                Some(dataset) => dataset,
                None => {
                    return RunOutcome::error(
                        "No listing data is currently available for your query, \
                         and no previously stored data was found.",
                    );
                }
            }
        } else {
            self.persist(&raw, RAW_NAMESPACE, &mut stored).await;
            let dataset: Vec<NormalizedListing> =
                raw.into_iter().map(normalize::normalize).collect();
            self.persist(&dataset, PROCESSED_NAMESPACE, &mut stored).await;
            dataset
        };

        let matched = filter::apply(&dataset, &entities);
        info!(total = dataset.len(), matched = matched.len(), "filtered dataset");

        let report = aggregate::summarize(
            &matched,
            &entities,
            REFERENCE_CURRENCY,
            self.cfg.usd_to_ghs_rate,
        );
        RunOutcome::success(report, stored)
    }

    /// Store failures never abort the run; the in-memory dataset is enough
    /// to answer the current query.
    async fn persist<T: Serialize>(
        &self,
        records: &[T],
        namespace: &str,
        stored: &mut BTreeMap<String, String>,
    ) {
        let Some(store) = &self.store else { return };
        match store.store(records, namespace).await {
            Ok(handle) => {
                stored.insert(namespace.to_string(), handle);
            }
            Err(e) => warn!(namespace, error = %e, "failed to persist records, continuing"),
        }
    }

    async fn load_fallback(&self) -> Option<Vec<NormalizedListing>> {
        let store = self.store.as_ref()?;
        match store.load_latest(PROCESSED_NAMESPACE).await {
            Ok(Some(records)) if !records.is_empty() => {
                info!(count = records.len(), "loaded most recent persisted dataset");
                Some(records)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "failed to load persisted dataset");
                None
            }
        }
    }
}
