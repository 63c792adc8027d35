use async_trait::async_trait;

use super::advertisement_record::{AdId, Advertisement, NewAdvertisement};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("advertisement id space exhausted")]
    IdsExhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CasOutcome {
    Applied(Advertisement),
    /// The stored version moved on since it was read.
    Conflict,
    Missing,
}

/// Key-value persistence for advertisements, keyed by id.
///
/// Implementations must make `compare_and_set` atomic per id: it is the only
/// primitive the view counter relies on to avoid lost updates, so a shared
/// backend has to enforce it server-side rather than in this process.
#[async_trait]
pub trait AdvertisementStore: Send + Sync {
    async fn insert(&self, draft: NewAdvertisement) -> Result<Advertisement, StoreError>;

    /// Unconditionally overwrites an existing record. Returns `None` when the
    /// id is not present; never creates a record.
    async fn save(&self, advertisement: Advertisement) -> Result<Option<Advertisement>, StoreError>;

    async fn compare_and_set(
        &self,
        advertisement: Advertisement,
        expected_version: u64,
    ) -> Result<CasOutcome, StoreError>;

    async fn find_by_id(&self, id: AdId) -> Result<Option<Advertisement>, StoreError>;

    async fn exists_by_id(&self, id: AdId) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, id: AdId) -> Result<bool, StoreError>;
}
