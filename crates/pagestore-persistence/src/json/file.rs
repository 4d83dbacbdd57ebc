//! Atomic JSON file storage

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pagestore_domain::{Entity, StorageError};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock, RwLockReadGuard};
use tracing::{debug, warn};

use crate::error::corrupt_json;

/// A single JSON file guarded by a read/write lock
///
/// Reads share the lock; a write holds it exclusively from the moment it
/// loads the current contents until the replacement file has been renamed
/// into place.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(RwLock::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) async fn read_guard(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().await
    }

    pub(crate) async fn write_guard(&self) -> OwnedRwLockWriteGuard<()> {
        Arc::clone(&self.lock).write_owned().await
    }

    /// Load every record. A missing or blank file is an empty collection.
    pub(crate) async fn load<E>(&self) -> Result<Vec<E>, StorageError>
    where
        E: Entity + DeserializeOwned,
    {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No data file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        if contents.trim().is_empty() {
            warn!(path = %self.path.display(), "Data file is empty, treating as no records");
            return Ok(Vec::new());
        }

        let location = self.path.display().to_string();
        let records: Vec<E> =
            serde_json::from_str(&contents).map_err(|e| corrupt_json(location.clone(), e))?;

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(StorageError::corrupt(
                    location,
                    format!("duplicate {} id {}", E::ENTITY_TYPE, record.id()),
                ));
            }
        }

        Ok(records)
    }

    /// Replace the file contents, keeping `guard` until the rename is done.
    ///
    /// The write runs on the blocking pool. It owns the guard, so dropping
    /// the calling future cannot let another writer in before the rename.
    pub(crate) async fn store<E>(
        &self,
        records: Vec<E>,
        guard: OwnedRwLockWriteGuard<()>,
    ) -> Result<(), StorageError>
    where
        E: Serialize + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let staged = stage(&path, &records)?;
            commit(staged, &path)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Write the full collection to a synced temporary file beside `target`
pub(crate) fn stage<E: Serialize>(target: &Path, records: &[E]) -> Result<NamedTempFile, StorageError> {
    let dir = parent_dir(target);
    std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

    let prefix = format!(
        ".{}.",
        target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    );
    let mut staged = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| StorageError::io(dir, e))?;

    let json = serde_json::to_vec_pretty(records)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    staged
        .write_all(&json)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| StorageError::io(staged.path(), e))?;

    Ok(staged)
}

/// Atomically rename a staged file over `target`
pub(crate) fn commit(staged: NamedTempFile, target: &Path) -> Result<(), StorageError> {
    staged
        .persist(target)
        .map_err(|e| StorageError::io(target, e.error))?;
    debug!(path = %target.display(), "Data file replaced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagestore_domain::{default_routes, Route, RouteName};

    fn dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let tmp = dir();
        let file = JsonFile::new(tmp.path().join("routes.json"));
        let routes: Vec<Route> = file.load().await.unwrap();
        assert!(routes.is_empty());
    }

    #[tokio::test]
    async fn test_blank_file_is_empty() {
        let tmp = dir();
        let path = tmp.path().join("routes.json");
        std::fs::write(&path, "  \n").unwrap();

        let routes: Vec<Route> = JsonFile::new(&path).load().await.unwrap();
        assert!(routes.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_fault() {
        let tmp = dir();
        let path = tmp.path().join("routes.json");
        std::fs::write(&path, "[{\"path\": \"/\",").unwrap();

        let err = JsonFile::new(&path).load::<Route>().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_corrupt() {
        let tmp = dir();
        let path = tmp.path().join("routes.json");
        let doubled = vec![Route::homepage(), Route::homepage()];
        std::fs::write(&path, serde_json::to_string(&doubled).unwrap()).unwrap();

        let err = JsonFile::new(&path).load::<Route>().await.unwrap_err();
        assert!(err.to_string().contains("duplicate Route id /"));
    }

    #[tokio::test]
    async fn test_store_then_load() {
        let tmp = dir();
        let file = JsonFile::new(tmp.path().join("nested").join("routes.json"));

        let guard = file.write_guard().await;
        file.store(default_routes(), guard).await.unwrap();

        let routes: Vec<Route> = file.load().await.unwrap();
        assert_eq!(routes, default_routes());
    }

    #[tokio::test]
    async fn test_interrupted_write_leaves_old_content() {
        let tmp = dir();
        let path = tmp.path().join("routes.json");
        let file = JsonFile::new(&path);

        let guard = file.write_guard().await;
        file.store(default_routes(), guard).await.unwrap();
        let before = std::fs::read(&path).unwrap();

        // Stage a new version, then "crash" before the rename: the staged
        // file is left behind on disk and never committed.
        let renamed = vec![Route::homepage().with_name(RouteName::parse("Start").unwrap())];
        let staged = stage(&path, &renamed).unwrap();
        let leftover = staged.into_temp_path().keep().unwrap();
        assert!(leftover.exists());

        assert_eq!(std::fs::read(&path).unwrap(), before);
        let routes: Vec<Route> = file.load().await.unwrap();
        assert_eq!(routes, default_routes());

        // The next successful write still replaces the file completely.
        let guard = file.write_guard().await;
        file.store(renamed.clone(), guard).await.unwrap();
        let routes: Vec<Route> = file.load().await.unwrap();
        assert_eq!(routes, renamed);
    }

    #[test]
    fn test_staged_file_lives_next_to_target() {
        let tmp = dir();
        let path = tmp.path().join("routes.json");
        let staged = stage(&path, &default_routes()).unwrap();
        assert_eq!(staged.path().parent(), Some(tmp.path()));
        assert!(!path.exists());

        commit(staged, &path).unwrap();
        assert!(path.exists());
    }
}
