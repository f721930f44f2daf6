// HTTP surface: GET /api/v1/units/ answers the availability query.

use crate::models::AvailableUnit;
use crate::query::{AvailabilityParams, ValidationErrors};
use crate::store::{AvailabilityStore, StoreError};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub const UNITS_PATH: &str = "/api/v1/units/";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::Store(e) => {
                tracing::error!("store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "detail": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitsResponse {
    pub items: Vec<AvailableUnit>,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AvailabilityStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AvailabilityStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(UNITS_PATH, get(available_units))
        .route(UNITS_PATH.trim_end_matches('/'), get(available_units))
        .with_state(state)
}

#[tracing::instrument(skip(state))]
async fn available_units(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<UnitsResponse>, ApiError> {
    let query = AvailabilityParams::from_pairs(pairs).validate().map_err(|errors| {
        tracing::info!("rejected availability query: {}", errors);
        errors
    })?;

    let items = state.store.available_units(&query)?;
    tracing::info!(items = items.len(), "availability resolved");
    Ok(Json(UnitsResponse { items }))
}
