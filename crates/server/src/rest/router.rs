use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{advertisements, health, metrics};
use crate::config::RateLimitConfig;
use crate::gateway::AdvertisementGateway;
use crate::metrics::ServerMetrics;
use crate::middleware::{rate_limit, RateLimiter};
use crate::store::AdvertisementStore;

#[derive(Clone)]
pub struct AppState {
    pub gateway: AdvertisementGateway,
    pub limiter: RateLimiter,
    pub metrics: Arc<ServerMetrics>,
}

impl AppState {
    pub fn new(store: Arc<dyn AdvertisementStore>, rate_limit: &RateLimitConfig) -> Self {
        let metrics = ServerMetrics::new();
        Self {
            gateway: AdvertisementGateway::new(store, metrics.clone()),
            limiter: RateLimiter::from_config(rate_limit),
            metrics,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let ads = Router::new()
        .route("/ads", post(advertisements::create_advertisement))
        .route(
            "/ads/{id}",
            get(advertisements::get_advertisement)
                .put(advertisements::update_advertisement)
                .delete(advertisements::delete_advertisement),
        );

    // Layered on the outer router so unmatched `/ads/*` requests are limited
    // too; the middleware itself skips every other path.
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/actuator/health", get(health::actuator_health))
        .route("/metrics", get(metrics::metrics))
        .merge(ads)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
