use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::StoreError;
use crate::models::photo::{is_allowed, sanitize_filename, unique_filename, Photo};

/// Photo inventory backed by a flat directory. Nothing is cached: every call
/// re-reads the directory.
#[derive(Clone)]
pub struct PhotoStore {
    dir: Arc<PathBuf>,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(self.dir.as_path()).await?;
        Ok(())
    }

    /// Lists allowed image files, newest first, with `id` set to the position.
    pub async fn list(&self) -> Result<Vec<Photo>, StoreError> {
        let mut entries = match fs::read_dir(self.dir.as_path()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut found: Vec<(SystemTime, Photo)> = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let filename = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if !is_allowed(&filename) {
                continue;
            }
            let meta = match entry.metadata().await {
                Ok(meta) if meta.is_file() => meta,
                Ok(_) => continue,
                // Removed between read_dir and stat
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            let modified = meta.modified()?;
            found.push((
                modified,
                Photo {
                    id: 0,
                    name: filename.clone(),
                    url: Photo::url_for(&filename),
                    filename,
                    size: meta.len(),
                    modified: DateTime::<Utc>::from(modified),
                },
            ));
        }

        found.sort_by(|(a_time, a), (b_time, b)| {
            b_time.cmp(a_time).then_with(|| a.filename.cmp(&b.filename))
        });

        Ok(found
            .into_iter()
            .enumerate()
            .map(|(id, (_, photo))| Photo { id, ..photo })
            .collect())
    }

    /// Stores an upload under `<stem>_<unix-seconds><ext>`.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<Photo, StoreError> {
        self.save_at(original_name, bytes, Utc::now().timestamp()).await
    }

    pub(crate) async fn save_at(
        &self,
        original_name: &str,
        bytes: &[u8],
        timestamp: i64,
    ) -> Result<Photo, StoreError> {
        if original_name.is_empty() {
            return Err(StoreError::NoFile);
        }
        if !is_allowed(original_name) {
            return Err(StoreError::NotAllowed);
        }
        let sanitized = sanitize_filename(original_name);
        if !is_allowed(&sanitized) {
            return Err(StoreError::NotAllowed);
        }

        let filename = unique_filename(&sanitized, timestamp);
        self.ensure_dir().await?;
        let path = self.dir.join(&filename);

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(filename));
            }
            Err(e) => return Err(e.into()),
        };
        if let Err(e) = write_all(&mut file, bytes).await {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(e.into());
        }

        tracing::info!("Saved photo {} ({} bytes)", filename, bytes.len());

        let position = self
            .list()
            .await?
            .into_iter()
            .find(|p| p.filename == filename);
        match position {
            Some(photo) => Ok(photo),
            None => {
                let meta = fs::metadata(&path).await?;
                Ok(Photo {
                    id: 0,
                    name: filename.clone(),
                    url: Photo::url_for(&filename),
                    filename,
                    size: meta.len(),
                    modified: DateTime::<Utc>::from(meta.modified()?),
                })
            }
        }
    }

    /// Removes a stored photo by its filename.
    pub async fn delete(&self, filename: &str) -> Result<(), StoreError> {
        if !is_flat_name(filename) || !is_allowed(filename) {
            return Err(StoreError::NotFound);
        }
        let path = self.dir.join(filename);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(StoreError::NotFound),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound)
            }
            Err(e) => return Err(e.into()),
        }
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!("Deleted photo {}", filename);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

fn is_flat_name(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\'])
}
