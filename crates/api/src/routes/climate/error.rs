use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{climate_data, RangeError};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    NotFound(#[from] RangeError),
    #[error("Failed to read climate data: {0}")]
    Store(#[from] climate_data::Error),
    #[error("Stored date is not a calendar date: {0}")]
    StoredDate(#[from] time::Error),
}

/// Error payload, `{"ERROR": "..."}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[serde(rename = "ERROR")]
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::StoredDate(_) => {
                error!("error serving climate data: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
