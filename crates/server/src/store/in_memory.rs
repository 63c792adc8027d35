use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::advertisement_record::{AdId, Advertisement, NewAdvertisement};
use super::advertisement_store::{AdvertisementStore, CasOutcome, StoreError};

#[derive(Clone)]
pub struct InMemoryAdvertisementStore {
    ads: Arc<DashMap<AdId, Advertisement>>,
    next_id: Arc<AtomicU64>,
}

impl Default for InMemoryAdvertisementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAdvertisementStore {
    pub fn new() -> Self {
        Self {
            ads: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn count(&self) -> usize {
        self.ads.len()
    }

    fn allocate_id(&self) -> Result<AdId, StoreError> {
        self.next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map_err(|_| StoreError::IdsExhausted)
    }
}

#[async_trait]
impl AdvertisementStore for InMemoryAdvertisementStore {
    async fn insert(&self, draft: NewAdvertisement) -> Result<Advertisement, StoreError> {
        let record = Advertisement {
            id: self.allocate_id()?,
            content: draft.content,
            created_at: draft.created_at,
            view_count: 0,
            version: 0,
        };
        self.ads.insert(record.id, record.clone());
        Ok(record)
    }

    async fn save(&self, advertisement: Advertisement) -> Result<Option<Advertisement>, StoreError> {
        let Some(mut entry) = self.ads.get_mut(&advertisement.id) else {
            return Ok(None);
        };
        let next = Advertisement {
            version: entry.version + 1,
            ..advertisement
        };
        *entry = next.clone();
        Ok(Some(next))
    }

    async fn compare_and_set(
        &self,
        advertisement: Advertisement,
        expected_version: u64,
    ) -> Result<CasOutcome, StoreError> {
        let Some(mut entry) = self.ads.get_mut(&advertisement.id) else {
            return Ok(CasOutcome::Missing);
        };
        if entry.version != expected_version {
            return Ok(CasOutcome::Conflict);
        }
        let next = Advertisement {
            version: expected_version + 1,
            ..advertisement
        };
        *entry = next.clone();
        Ok(CasOutcome::Applied(next))
    }

    async fn find_by_id(&self, id: AdId) -> Result<Option<Advertisement>, StoreError> {
        Ok(self.ads.get(&id).map(|r| r.clone()))
    }

    async fn exists_by_id(&self, id: AdId) -> Result<bool, StoreError> {
        Ok(self.ads.contains_key(&id))
    }

    async fn delete_by_id(&self, id: AdId) -> Result<bool, StoreError> {
        Ok(self.ads.remove(&id).is_some())
    }
}
