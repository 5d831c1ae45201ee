pub mod pages;
pub mod photos;
pub mod settings;
pub mod ws;

use axum::Router;
use tower_http::services::ServeDir;

use crate::models::photo::PHOTO_URL_PREFIX;
use crate::AppState;

pub fn api_router(state: AppState) -> Router {
    let photo_files = ServeDir::new(state.photos.dir());
    Router::new()
        .merge(pages::router())
        .merge(photos::router(state.max_upload_bytes))
        .merge(settings::router())
        .merge(ws::router())
        .nest_service(PHOTO_URL_PREFIX, photo_files)
        .with_state(state)
}
