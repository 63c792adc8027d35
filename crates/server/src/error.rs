use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::{AdId, StoreError};

pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum AdError {
    #[error("Advertisement with id {0} not found")]
    NotFound(AdId),
    #[error("Validation error: {field} {reason}")]
    Validation { field: String, reason: String },
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("Internal server error: {0}")]
    Unexpected(String),
}

impl AdError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AdError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "advertisement store failure");
        Self::Unexpected(e.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub message: String,
}

impl IntoResponse for AdError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::RateLimited = self {
            return (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                RATE_LIMIT_MESSAGE,
            )
                .into_response();
        }
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
