use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;
use models::filename;

/// Result of persisting one upload.
#[derive(Debug, Clone)]
pub struct SavedPhoto {
    /// Unique on-disk name: `{YYYYMMDDHHMMSS}-{8 hex}-{sanitized original}`.
    pub stored_name: String,
    /// Sanitized original filename; the upload response's fallback title.
    pub sanitized_name: String,
    /// The written file's mtime in epoch milliseconds.
    pub date_added: i64,
}

/// One entry of a directory scan.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub stored_name: String,
    pub date_added: i64,
}

/// Directory-backed photo store. The flat upload directory is the only
/// persistence layer; there is no index, and every listing re-reads it.
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Open the store rooted at `path`, creating the directory if absent.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let root = path.into();
        fs::create_dir_all(&root).await?;
        Ok(Arc::new(Self { root }))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one upload under a freshly generated stored name and report
    /// the written file's mtime. The extension check runs before anything
    /// touches the disk, so a rejected upload leaves the store unchanged.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<SavedPhoto, ServiceError> {
        if !filename::is_allowed(original_name) {
            return Err(ServiceError::Validation("file type not allowed".into()));
        }

        let sanitized_name = filename::sanitize(original_name);
        let stored_name = format!(
            "{}-{}-{}",
            Utc::now().format("%Y%m%d%H%M%S"),
            &Uuid::new_v4().simple().to_string()[..8],
            sanitized_name,
        );
        let dest = self.root.join(&stored_name);

        fs::write(&dest, data).await?;
        let modified = fs::metadata(&dest).await?.modified()?;
        debug!(stored = %stored_name, bytes = data.len(), "photo written");

        Ok(SavedPhoto {
            stored_name,
            sanitized_name,
            date_added: epoch_millis(modified),
        })
    }

    /// Scan the store directory and return every allowed image file, newest
    /// mtime first. Equal timestamps tie-break on filename, descending.
    pub async fn list(&self) -> Result<Vec<StoredEntry>, ServiceError> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.root).await?;
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !filename::is_allowed(&name) {
                continue;
            }
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            entries.push(StoredEntry {
                stored_name: name,
                date_added: epoch_millis(meta.modified()?),
            });
        }
        entries.sort_by(|a, b| {
            b.date_added
                .cmp(&a.date_added)
                .then_with(|| b.stored_name.cmp(&a.stored_name))
        });
        Ok(entries)
    }

    /// Read a stored file's bytes. The name must be a single normal path
    /// component; separators, `..`, or absolute prefixes never reach the
    /// filesystem and surface as not-found.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, ServiceError> {
        let path = self.resolve(name)?;
        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ServiceError::not_found(name));
            }
            Err(e) => return Err(ServiceError::Io(e)),
        };
        if !meta.is_file() {
            return Err(ServiceError::not_found(name));
        }
        Ok(fs::read(&path).await?)
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, ServiceError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(ServiceError::not_found(name)),
        }
    }
}

fn epoch_millis(t: SystemTime) -> i64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
