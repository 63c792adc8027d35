use std::sync::Arc;

use crate::error::AdError;
use crate::metrics::ServerMetrics;
use crate::store::{AdId, Advertisement, AdvertisementStore, CasOutcome};

/// Records one view per successful retrieval.
///
/// The read-increment-write runs as an optimistic loop against the store's
/// versioned `compare_and_set`, so concurrent retrievals of the same id never
/// lose an increment and retrievals of different ids never share a lock.
#[derive(Clone)]
pub struct ViewCounter {
    store: Arc<dyn AdvertisementStore>,
    metrics: Arc<ServerMetrics>,
}

impl ViewCounter {
    pub fn new(store: Arc<dyn AdvertisementStore>, metrics: Arc<ServerMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Returns the advertisement as persisted, with the incremented count.
    pub async fn get_and_increment(&self, id: AdId) -> Result<Advertisement, AdError> {
        let mut conflicts = 0u32;
        loop {
            let current = self
                .store
                .find_by_id(id)
                .await?
                .ok_or(AdError::NotFound(id))?;
            let expected = current.version;
            let next_count = current.view_count.saturating_add(1);

            match self
                .store
                .compare_and_set(current.with_view_count(next_count), expected)
                .await?
            {
                CasOutcome::Applied(saved) => {
                    self.metrics.inc_views();
                    if conflicts > 0 {
                        tracing::debug!(id, conflicts, "view count settled after retries");
                    }
                    return Ok(saved);
                }
                // Another write committed first; re-read and try again.
                CasOutcome::Conflict => {
                    conflicts += 1;
                    self.metrics.inc_view_conflicts();
                    tokio::task::yield_now().await;
                }
                CasOutcome::Missing => return Err(AdError::NotFound(id)),
            }
        }
    }
}
