pub mod photos;
pub mod settings;

use thiserror::Error;

pub use photos::PhotoStore;
pub use settings::SettingsStore;

/// Failures raised by the filesystem-backed stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No file selected")]
    NoFile,

    #[error("File type not allowed")]
    NotAllowed,

    #[error("File not found or not allowed")]
    NotFound,

    #[error("A photo named {0} already exists")]
    AlreadyExists(String),

    #[error("Configuration must be a JSON object")]
    InvalidDocument,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
