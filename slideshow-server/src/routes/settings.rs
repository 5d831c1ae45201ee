use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::events::ServerEvent;
use crate::models::photo::ApiResponse;
use crate::models::settings::Settings;
use crate::store::StoreError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/config", get(get_config).post(update_config))
}

#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Current settings, or defaults", body = Settings),
    ),
    tag = "Config"
)]
pub(crate) async fn get_config(State(state): State<AppState>) -> Json<Value> {
    Json(state.settings.load().await)
}

#[utoipa::path(
    post,
    path = "/api/config",
    request_body = Settings,
    responses(
        (status = 200, description = "Settings replaced", body = ApiResponse),
        (status = 400, description = "Body is not a JSON object", body = ApiResponse),
        (status = 500, description = "Settings file could not be written", body = ApiResponse),
    ),
    tag = "Config"
)]
pub(crate) async fn update_config(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(document) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    state.settings.save(&document).await.map_err(|e| match e {
        StoreError::InvalidDocument => ApiError::from(e),
        _ => ApiError::Persistence,
    })?;
    state
        .events
        .publish(&ServerEvent::ConfigUpdated(document));

    Ok(Json(ApiResponse::ok("Configuration updated")))
}
