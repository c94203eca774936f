//! Durable storage of the last-selected project.
//!
//! The selection survives a restart the way the browser dashboard's
//! `localStorage` entry survives a reload: one fixed key, read at
//! startup, written on every selection change.
//!
//! On disk this is a single JSON file in the state directory:
//!
//! ```text
//! ~/.atrium/state/
//! └── selected_project.json
//! ```

use atrium_types::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Fixed storage key for the active selection.
pub const SELECTION_KEY: &str = "selected_project";

/// Error from the selection store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure.
    #[error("selection store I/O error at {path}: {source}")]
    Io {
        /// Affected path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The stored file was not valid JSON.
    #[error("corrupt selection file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl atrium_types::ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "STORE_IO",
            Self::Corrupt(_) => "STORE_CORRUPT",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A corrupt file is overwritten on the next save.
        true
    }
}

/// Persisted record, with a timestamp for debugging stale state.
#[derive(Debug, Serialize, Deserialize)]
struct SelectionRecord {
    project_id: ProjectId,
    updated_at: DateTime<Utc>,
}

/// File-backed store for the last-selected project id.
///
/// Writes are atomic (temp file + rename) so a crash mid-write leaves
/// the previous selection intact.
///
/// # Example
///
/// ```no_run
/// use atrium_app::SelectionStore;
/// use atrium_types::ProjectId;
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), atrium_app::StorageError> {
/// let store = SelectionStore::new(PathBuf::from("~/.atrium/state"))?;
/// store.save(&ProjectId::new("p1")).await?;
/// assert_eq!(store.load().await?, Some(ProjectId::new("p1")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SelectionStore {
    base_path: PathBuf,
}

impl SelectionStore {
    /// Creates a store rooted at `base_path`, creating the directory
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the directory cannot be
    /// created.
    pub fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        if !base_path.exists() {
            std::fs::create_dir_all(&base_path).map_err(|source| StorageError::Io {
                path: base_path.clone(),
                source,
            })?;
        }
        Ok(Self { base_path })
    }

    fn file_path(&self) -> PathBuf {
        self.base_path.join(format!("{SELECTION_KEY}.json"))
    }

    /// Reads the stored selection, `None` when nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on unreadable or corrupt state. The
    /// selector treats any error as "no stored selection".
    pub async fn load(&self) -> Result<Option<ProjectId>, StorageError> {
        let path = self.file_path();
        match fs::read_to_string(&path).await {
            Ok(contents) => {
                let record: SelectionRecord = serde_json::from_str(&contents)?;
                Ok(Some(record.project_id))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    /// Writes the selection atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on filesystem failure.
    pub async fn save(&self, project_id: &ProjectId) -> Result<(), StorageError> {
        let record = SelectionRecord {
            project_id: project_id.clone(),
            updated_at: Utc::now(),
        };
        // serde_json cannot fail on this shape.
        let json = serde_json::to_string_pretty(&record)?;

        let path = self.file_path();
        let tmp = self.base_path.join(format!(".{SELECTION_KEY}.json.tmp"));
        write_atomic(&tmp, &path, json.as_bytes()).await?;
        debug!(%project_id, "persisted selection");
        Ok(())
    }

    /// Removes the stored selection, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on filesystem failure other than
    /// the file already being absent.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let path = self.file_path();
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

async fn write_atomic(tmp: &Path, dest: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    fs::write(tmp, bytes).await.map_err(|source| StorageError::Io {
        path: tmp.to_path_buf(),
        source,
    })?;
    fs::rename(tmp, dest).await.map_err(|source| StorageError::Io {
        path: dest.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SelectionStore::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.load().await.unwrap(), None);
        store.save(&ProjectId::new("p7")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(ProjectId::new("p7")));

        // Overwrite wins.
        store.save(&ProjectId::new("p8")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(ProjectId::new("p8")));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SelectionStore::new(dir.path().to_path_buf()).unwrap();
        store.clear().await.unwrap();
        store.save(&ProjectId::new("p1")).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SelectionStore::new(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join("selected_project.json"), "not-json").unwrap();
        assert!(matches!(
            store.load().await,
            Err(StorageError::Corrupt(_))
        ));
    }
}
