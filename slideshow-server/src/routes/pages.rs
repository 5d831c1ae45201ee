use axum::{extract::State, response::Html, routing::get, Router};
use serde_json::json;

use crate::error::ApiError;
use crate::AppState;

const TV_DISPLAY_TEMPLATE: &str = include_str!("../../templates/tv_display.html");
const ADMIN_PANEL_TEMPLATE: &str = include_str!("../../templates/admin_panel.html");

/// Marker replaced with the `{photos, config}` bootstrap document.
const BOOTSTRAP_MARKER: &str = "__BOOTSTRAP_JSON__";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tv_display))
        .route("/admin", get(admin_panel))
}

async fn tv_display(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, TV_DISPLAY_TEMPLATE).await
}

async fn admin_panel(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, ADMIN_PANEL_TEMPLATE).await
}

async fn render(state: &AppState, template: &str) -> Result<Html<String>, ApiError> {
    let config = state.settings.load().await;
    let photos = state.photos.list().await?;
    let bootstrap = json!({ "photos": photos, "config": config });
    let encoded =
        serde_json::to_string(&bootstrap).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Html(template.replace(BOOTSTRAP_MARKER, &script_safe(&encoded))))
}

/// Escapes JSON for embedding in a `<script>` element. `<` only ever occurs
/// inside JSON strings, so the `\u003c` escape keeps the document valid.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
