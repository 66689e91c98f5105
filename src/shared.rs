use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::recalc::RecalcOrchestrator;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RecalcOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<RecalcOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Failure kinds surfaced by storage backends. Individual-item problems are
/// reported as counts by the batch services; these are for the store itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("validation failed: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Validation(msg) => AppError::BadRequest(msg),
            StoreError::Unavailable(msg) => AppError::Store(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Store error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
