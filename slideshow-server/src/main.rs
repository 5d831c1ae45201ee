mod broadcast;
mod config;
mod error;
mod models;
mod routes;
mod startup;
mod store;

use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::broadcast::{Broadcaster, EventPublisher};
use crate::store::{PhotoStore, SettingsStore};

#[derive(Clone)]
pub struct AppState {
    pub photos: PhotoStore,
    pub settings: SettingsStore,
    /// Where handlers publish live updates.
    pub events: Arc<dyn EventPublisher>,
    /// WebSocket side of the live-update channel; sessions subscribe here.
    pub broadcaster: Broadcaster,
    pub max_upload_bytes: usize,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::photos::list_photos,
        routes::photos::upload_photo,
        routes::photos::delete_photo,
        routes::photos::reorder_photos,
        routes::settings::get_config,
        routes::settings::update_config,
    ),
    components(schemas(
        models::photo::Photo,
        models::photo::ApiResponse,
        models::photo::ReorderRequest,
        models::photo::UploadForm,
        models::settings::Settings,
        models::settings::SlideshowConfig,
        models::settings::DisplayConfig,
    )),
    tags(
        (name = "Photos", description = "Photo inventory: list, upload, delete, reorder"),
        (name = "Config", description = "Slideshow and display settings")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slideshow_server=debug,tower_http=debug")),
        )
        .init();

    let config = config::Config::from_env();

    let broadcaster = Broadcaster::new();
    let state = AppState {
        photos: PhotoStore::new(&config.photos_dir),
        settings: SettingsStore::new(&config.settings_path),
        events: Arc::new(broadcaster.clone()),
        broadcaster,
        max_upload_bytes: config.max_upload_bytes,
    };

    if let Err(e) = startup::prepare(&state.photos, &state.settings).await {
        tracing::error!("Failed to prepare storage: {}", e);
        tracing::error!(
            "Check that {} and {} are writable",
            config.photos_dir.display(),
            config.settings_path.display()
        );
        return Err(std::io::Error::other(e));
    }

    let cors = if config.cors_origins == "*" || config.cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(tower_http::cors::Any)
    };

    let app = routes::api_router(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.listen_addr, e);
            tracing::error!("Is another server running? Set LISTEN_ADDR to use a different port");
            return Err(e);
        }
    };
    startup::log_banner(&config, startup::local_ip());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
