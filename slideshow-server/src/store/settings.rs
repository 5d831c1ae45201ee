use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::fs;
use uuid::Uuid;

use super::StoreError;
use crate::models::settings::Settings;

/// Slideshow settings persisted as a single JSON document.
#[derive(Clone)]
pub struct SettingsStore {
    path: Arc<PathBuf>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored document, or the defaults if it is missing or unreadable.
    pub async fn load(&self) -> Value {
        match self.try_load().await {
            Ok(Some(doc)) => doc,
            Ok(None) => Settings::default_document(),
            Err(e) => {
                tracing::error!("Error loading config {}: {}", self.path.display(), e);
                Settings::default_document()
            }
        }
    }

    async fn try_load(&self) -> Result<Option<Value>, StoreError> {
        let raw = match fs::read(self.path.as_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    /// Replaces the whole document. Each write goes to its own sibling temp file
    /// that is then renamed over the target, so readers never see a partial file
    /// and concurrent saves never share a temp file.
    pub async fn save(&self, document: &Value) -> Result<(), StoreError> {
        if !document.is_object() {
            return Err(StoreError::InvalidDocument);
        }
        let result = self.write_document(document).await;
        if let Err(e) = &result {
            tracing::error!("Error saving config {}: {}", self.path.display(), e);
        }
        result
    }

    async fn write_document(&self, document: &Value) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(document)?;
        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        tmp_name.push(format!(".{}.tmp", Uuid::new_v4()));
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, &body).await?;
        if let Err(e) = fs::rename(&tmp_path, self.path.as_path()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Writes the default document if no settings file exists yet.
    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        if fs::try_exists(self.path.as_path()).await? {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        tracing::info!("Writing default config to {}", self.path.display());
        self.save(&Settings::default_document()).await
    }
}
