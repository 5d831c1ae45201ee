use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::photo::Photo;

// ── WebSocket messages ───────────────────────────────────────────────────────

/// Server-to-client push events, framed as `{"event": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "connected")]
    Connected { status: String },
    #[serde(rename = "photo_added")]
    PhotoAdded(Photo),
    #[serde(rename = "photo_deleted")]
    PhotoDeleted { filename: String },
    #[serde(rename = "photos_reordered")]
    PhotosReordered { order: Value },
    #[serde(rename = "config_updated")]
    ConfigUpdated(Value),
}

impl ServerEvent {
    pub fn connected() -> Self {
        ServerEvent::Connected {
            status: "connected".to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected { .. } => "connected",
            ServerEvent::PhotoAdded(_) => "photo_added",
            ServerEvent::PhotoDeleted { .. } => "photo_deleted",
            ServerEvent::PhotosReordered { .. } => "photos_reordered",
            ServerEvent::ConfigUpdated(_) => "config_updated",
        }
    }
}
