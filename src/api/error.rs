use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::error;

use crate::api::response::ApiResponse;
use crate::processor::ingest::LocationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Unauthorized")]
    Forbidden,
    #[error("Vehicle not found")]
    NotFound,
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        let field = match e {
            LocationError::Forbidden(_) => return ApiError::Forbidden,
            // Only tracker pings carry correlation ids.
            dup @ LocationError::Duplicate(_) => return ApiError::Internal(dup.into()),
            LocationError::Store(err) => return err.into(),
            LocationError::MissingVehicleId | LocationError::UnknownVehicle(_) => "vehicle_id",
            LocationError::MissingCoordinates | LocationError::InvalidLatitude(_) => "latitude",
            LocationError::InvalidLongitude(_) => "longitude",
            LocationError::InvalidTimestamp(_) => "timestamp",
        };
        ApiError::Validation {
            field,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation { field, message } => {
                let mut errors = Map::new();
                errors.insert(field.to_string(), json!([message]));
                ApiResponse::<()>::failure("Validation errors", Some(Value::Object(errors)))
            }
            ApiError::Internal(e) => {
                error!("Request failed: {:#}", e);
                ApiResponse::<()>::failure("Internal server error", None)
            }
            other => ApiResponse::<()>::failure(other.to_string(), None),
        };
        (status, body).into_response()
    }
}
