use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AdError;
use crate::rest::AppState;
use crate::store::{AdId, Advertisement};

#[derive(Deserialize)]
pub struct CreateAdvertisementRequest {
    pub content: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdvertisementRequest {
    pub content: Option<String>,
    #[serde(default)]
    pub view_count: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementResponse {
    pub id: AdId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub view_count: u64,
}

impl From<Advertisement> for AdvertisementResponse {
    fn from(ad: Advertisement) -> Self {
        Self {
            id: ad.id,
            content: ad.content,
            created_at: ad.created_at,
            view_count: ad.view_count,
        }
    }
}

fn ad_id(path: Result<Path<AdId>, PathRejection>) -> Result<AdId, AdError> {
    path.map(|Path(id)| id)
        .map_err(|_| AdError::validation("id", "must be a non-negative integer"))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AdError> {
    body.map(|Json(b)| b)
        .map_err(|e| AdError::validation("body", e.body_text()))
}

pub async fn create_advertisement(
    State(state): State<AppState>,
    body: Result<Json<CreateAdvertisementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AdvertisementResponse>), AdError> {
    let body = json_body(body)?;
    let created = state.gateway.create(body.content.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn get_advertisement(
    State(state): State<AppState>,
    path: Result<Path<AdId>, PathRejection>,
) -> Result<Json<AdvertisementResponse>, AdError> {
    let id = ad_id(path)?;
    let ad = state.gateway.get(id).await?;
    Ok(Json(ad.into()))
}

pub async fn update_advertisement(
    State(state): State<AppState>,
    path: Result<Path<AdId>, PathRejection>,
    body: Result<Json<UpdateAdvertisementRequest>, JsonRejection>,
) -> Result<Json<AdvertisementResponse>, AdError> {
    let id = ad_id(path)?;
    let body = json_body(body)?;
    let updated = state
        .gateway
        .update(id, body.content.as_deref(), body.view_count)
        .await?;
    Ok(Json(updated.into()))
}

pub async fn delete_advertisement(
    State(state): State<AppState>,
    path: Result<Path<AdId>, PathRejection>,
) -> Result<StatusCode, AdError> {
    let id = ad_id(path)?;
    state.gateway.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
