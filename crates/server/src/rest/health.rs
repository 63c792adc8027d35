use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ActuatorHealth {
    pub status: &'static str,
    pub application: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

pub async fn actuator_health() -> Json<ActuatorHealth> {
    Json(ActuatorHealth {
        status: "UP",
        application: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}
