use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ServerMetrics {
    ad_requests_total: AtomicU64,
    rate_limited_total: AtomicU64,
    ads_created_total: AtomicU64,
    ads_updated_total: AtomicU64,
    ads_deleted_total: AtomicU64,
    views_total: AtomicU64,
    view_conflicts_total: AtomicU64,
}

impl ServerMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_ad_requests(&self) {
        self.ad_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rate_limited(&self) {
        self.rate_limited_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ads_created(&self) {
        self.ads_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ads_updated(&self) {
        self.ads_updated_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ads_deleted(&self) {
        self.ads_deleted_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_views(&self) {
        self.views_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_view_conflicts(&self) {
        self.view_conflicts_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn ad_requests_total(&self) -> u64 {
        self.ad_requests_total.load(Ordering::Relaxed)
    }

    pub fn rate_limited_total(&self) -> u64 {
        self.rate_limited_total.load(Ordering::Relaxed)
    }

    pub fn ads_created_total(&self) -> u64 {
        self.ads_created_total.load(Ordering::Relaxed)
    }

    pub fn ads_updated_total(&self) -> u64 {
        self.ads_updated_total.load(Ordering::Relaxed)
    }

    pub fn ads_deleted_total(&self) -> u64 {
        self.ads_deleted_total.load(Ordering::Relaxed)
    }

    pub fn views_total(&self) -> u64 {
        self.views_total.load(Ordering::Relaxed)
    }

    pub fn view_conflicts_total(&self) -> u64 {
        self.view_conflicts_total.load(Ordering::Relaxed)
    }
}
