use chrono::Utc;
use std::sync::Arc;

use super::validation::{validate_content, validate_view_count};
use super::view_counter::ViewCounter;
use crate::error::AdError;
use crate::metrics::ServerMetrics;
use crate::store::{AdId, Advertisement, AdvertisementStore, NewAdvertisement};

/// Entry point for advertisement operations once a request has been admitted.
#[derive(Clone)]
pub struct AdvertisementGateway {
    store: Arc<dyn AdvertisementStore>,
    views: ViewCounter,
    metrics: Arc<ServerMetrics>,
}

impl AdvertisementGateway {
    pub fn new(store: Arc<dyn AdvertisementStore>, metrics: Arc<ServerMetrics>) -> Self {
        Self {
            views: ViewCounter::new(store.clone(), metrics.clone()),
            store,
            metrics,
        }
    }

    pub async fn create(&self, content: Option<&str>) -> Result<Advertisement, AdError> {
        let content = validate_content(content)?;
        let created = self
            .store
            .insert(NewAdvertisement {
                content: content.to_string(),
                created_at: Utc::now(),
            })
            .await?;
        self.metrics.inc_ads_created();
        tracing::info!(id = created.id, "advertisement created");
        Ok(created)
    }

    /// Overwrites content and view count. Racing a concurrent view, the
    /// later write wins.
    pub async fn update(
        &self,
        id: AdId,
        content: Option<&str>,
        view_count: i64,
    ) -> Result<Advertisement, AdError> {
        let content = validate_content(content)?;
        let view_count = validate_view_count(view_count)?;

        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AdError::NotFound(id))?;
        let updated = Advertisement {
            content: content.to_string(),
            view_count,
            ..existing
        };
        let saved = self
            .store
            .save(updated)
            .await?
            .ok_or(AdError::NotFound(id))?;
        self.metrics.inc_ads_updated();
        tracing::info!(id, view_count, "advertisement updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: AdId) -> Result<(), AdError> {
        if !self.store.delete_by_id(id).await? {
            return Err(AdError::NotFound(id));
        }
        self.metrics.inc_ads_deleted();
        tracing::info!(id, "advertisement deleted");
        Ok(())
    }

    /// Fetches and records a view. The increment runs on its own task so a
    /// caller that goes away mid-request still gets counted.
    pub async fn get(&self, id: AdId) -> Result<Advertisement, AdError> {
        let views = self.views.clone();
        tokio::spawn(async move { views.get_and_increment(id).await })
            .await
            .map_err(|e| {
                tracing::error!(id, error = %e, "view increment task failed");
                AdError::Unexpected("view increment aborted".into())
            })?
    }

    pub async fn exists(&self, id: AdId) -> Result<bool, AdError> {
        Ok(self.store.exists_by_id(id).await?)
    }
}
