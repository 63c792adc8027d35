use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type AdId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: AdId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub view_count: u64,
    /// Bumped by the store on every write; used for conditional updates.
    pub version: u64,
}

impl Advertisement {
    pub fn with_view_count(mut self, view_count: u64) -> Self {
        self.view_count = view_count;
        self
    }
}

/// An advertisement that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdvertisement {
    pub content: String,
    pub created_at: DateTime<Utc>,
}
