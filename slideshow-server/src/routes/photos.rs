use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::error::ApiError;
use crate::models::events::ServerEvent;
use crate::models::photo::{ApiResponse, Photo, ReorderRequest, UploadForm};
use crate::AppState;

/// Multipart field carrying the uploaded image.
const UPLOAD_FIELD: &str = "photo";

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/photos", get(list_photos))
        .route(
            "/upload",
            post(upload_photo).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/delete/{filename}", delete(delete_photo))
        .route("/reorder", post(reorder_photos))
}

#[utoipa::path(
    get,
    path = "/api/photos",
    responses(
        (status = 200, description = "Photos, newest first", body = Vec<Photo>),
    ),
    tag = "Photos"
)]
pub(crate) async fn list_photos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Photo>>, ApiError> {
    Ok(Json(state.photos.list().await?))
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored", body = ApiResponse),
        (status = 400, description = "No file or disallowed type", body = ApiResponse),
        (status = 409, description = "Generated name already taken", body = ApiResponse),
        (status = 413, description = "Upload too large", body = ApiResponse),
    ),
    tag = "Photos"
)]
pub(crate) async fn upload_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::Validation(e.body_text()))?;
    let limit = state.max_upload_bytes;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::Validation("No file selected".to_string()))?;
    if bytes.len() > limit {
        return Err(ApiError::PayloadTooLarge(limit));
    }

    let photo = state.photos.save(&filename, &bytes).await?;
    state
        .events
        .publish(&ServerEvent::PhotoAdded(photo.clone()));

    Ok(Json(
        ApiResponse::ok("Photo uploaded successfully").with_photo(photo),
    ))
}

fn multipart_error(e: MultipartError, limit: usize) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(limit)
    } else {
        ApiError::Validation(e.body_text())
    }
}

#[utoipa::path(
    delete,
    path = "/delete/{filename}",
    params(("filename" = String, Path, description = "Stored file name (not the listing id)")),
    responses(
        (status = 200, description = "Photo deleted", body = ApiResponse),
        (status = 404, description = "Not found or not an image", body = ApiResponse),
    ),
    tag = "Photos"
)]
pub(crate) async fn delete_photo(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.photos.delete(&filename).await?;
    state
        .events
        .publish(&ServerEvent::PhotoDeleted { filename });

    Ok(Json(ApiResponse::ok("Photo deleted successfully")))
}

/// Relays a client-side ordering to every display. The order is not stored;
/// listings stay newest-first.
#[utoipa::path(
    post,
    path = "/reorder",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Order broadcast", body = ApiResponse),
        (status = 400, description = "Malformed body", body = ApiResponse),
    ),
    tag = "Photos"
)]
pub(crate) async fn reorder_photos(
    State(state): State<AppState>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    state
        .events
        .publish(&ServerEvent::PhotosReordered { order: req.order });

    Ok(Json(ApiResponse::ok("Order updated")))
}
