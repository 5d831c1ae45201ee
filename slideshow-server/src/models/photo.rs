use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Extensions accepted for upload and listing, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// URL prefix under which the upload directory is served.
pub const PHOTO_URL_PREFIX: &str = "/static/photos";

// ── API types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Photo {
    /// Position in the current listing, newest first. Not a stable key:
    /// use `filename` to refer to a photo.
    pub id: usize,
    pub name: String,
    pub filename: String,
    /// Size in bytes
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub url: String,
}

impl Photo {
    pub fn url_for(filename: &str) -> String {
        format!("{}/{}", PHOTO_URL_PREFIX, filename)
    }
}

/// JSON envelope returned by every mutating endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
}

impl ApiResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            photo: None,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            photo: None,
        }
    }

    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }
}

/// Multipart form accepted by `/upload`.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub photo: Vec<u8>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderRequest {
    /// Client-side ordering (usually filenames). Broadcast as-is, never stored.
    #[serde(default = "empty_order")]
    #[schema(value_type = Vec<Object>)]
    pub order: serde_json::Value,
}

fn empty_order() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

/// Returns the lowercase extension of `filename` if it is an allowed image type.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

pub fn is_allowed(filename: &str) -> bool {
    allowed_extension(filename).is_some()
}

/// Reduces an uploaded file name to a safe, flat, ASCII-only name.
///
/// Path separators become spaces, whitespace runs are joined with `_`, any
/// character outside `[A-Za-z0-9_.-]` is dropped, and leading or trailing
/// `.`/`_` are stripped. The result may be empty.
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Builds `<stem>_<timestamp><.ext>` from a sanitized name.
pub fn unique_filename(sanitized: &str, timestamp: i64) -> String {
    match sanitized.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, timestamp, ext),
        _ => format!("{}_{}", sanitized, timestamp),
    }
}
