//! Core storage engine implementation providing sandboxed, atomic file I/O.
//!
//! This module contains the primary [`Storage`] handle, which serves as the entry
//! point for all storage operations. It manages the physical filesystem root and
//! handles security enforcement via path resolution.

use crate::error::{StorageError, StorageErrorExt};
use crate::security;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const TMP_SUFFIX: &str = "tmp";

/// The internal shared state of a [`Storage`] instance.
#[derive(Debug)]
pub struct StorageInner {
    /// The canonicalized physical path on the disk where all data is stored.
    pub(crate) root: PathBuf,
    /// A unique counter used to generate temporary file names.
    pub(crate) tmp_counter: AtomicU64,
}

/// A thread-safe handle to the storage engine.
///
/// `Storage` provides a sandboxed filesystem environment where all paths are
/// validated to prevent traversal attacks. Writes go through a unique temp file,
/// are fsync'd, and are renamed into place, so readers never observe a partial
/// file. The handle is internally reference-counted (`Arc`) and can be cheaply
/// cloned across threads or tasks.
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Deref for Storage {
    type Target = StorageInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Storage {
    #[must_use = "The storage engine is not initialized until you call .connect()"]
    pub fn builder() -> crate::builder::StorageBuilder {
        crate::builder::StorageBuilder::new()
    }

    /// The canonical root directory of the sandbox.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.inner.root
    }

    /// Resolves a relative path to a physical path on the disk within the storage root.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if the path is absolute,
    /// escapes the root, or passes through a symlink pointing outside it.
    pub fn resolve(&self, path: impl AsRef<std::path::Path>) -> Result<PathBuf, StorageError> {
        security::resolve_path(&self.inner.root, path)
    }

    /// Returns whether a file exists at the given sandbox-relative path.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] for invalid paths.
    pub fn exists(&self, path: impl AsRef<std::path::Path>) -> Result<bool, StorageError> {
        Ok(self.resolve(path)?.is_file())
    }

    /// Atomically writes `data` to the given sandbox-relative path.
    ///
    /// Parent directories are created as needed. The data lands in a unique
    /// `.tmp` sibling first, is flushed to disk, and is renamed over the
    /// target, replacing any previous content.
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] on filesystem failures and
    /// [`StorageError::PathTraversalAttempt`] for invalid paths.
    pub async fn write(
        &self,
        path: impl AsRef<std::path::Path>,
        data: &[u8],
    ) -> Result<(), StorageError> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .context(format!("Creating parent directories for {}", target.display()))?;
        }

        let tmp = self.tmp_sibling(&target)?;

        let mut file = fs::File::create(&tmp)
            .await
            .context(format!("Creating temp file {}", tmp.display()))?;
        file.write_all(data).await.context("Writing temp file")?;
        file.sync_all().await.context("Flushing temp file")?;
        drop(file);

        fs::rename(&tmp, &target)
            .await
            .context(format!("Committing {} into place", target.display()))?;

        debug!(path = %target.display(), bytes = data.len(), "File written atomically");
        Ok(())
    }

    /// Reads the full contents of a file at the given sandbox-relative path.
    ///
    /// # Errors
    /// Returns [`StorageError::FileNotFound`] if the file does not exist and
    /// [`StorageError::Io`] on other filesystem failures.
    pub async fn read(&self, path: impl AsRef<std::path::Path>) -> Result<Vec<u8>, StorageError> {
        let target = self.resolve(&path)?;

        match fs::read(&target).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::FileNotFound {
                message: path.as_ref().display().to_string().into(),
                context: None,
            }),
            Err(e) => Err(StorageError::Io { source: e, context: None }),
        }
    }

    /// Removes the file at the given sandbox-relative path.
    ///
    /// # Errors
    /// Returns [`StorageError::FileNotFound`] if the file does not exist.
    pub async fn remove(&self, path: impl AsRef<std::path::Path>) -> Result<(), StorageError> {
        let target = self.resolve(&path)?;

        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::FileNotFound {
                message: path.as_ref().display().to_string().into(),
                context: None,
            }),
            Err(e) => Err(StorageError::Io { source: e, context: None }),
        }
    }

    fn tmp_sibling(&self, target: &std::path::Path) -> Result<PathBuf, StorageError> {
        let filename =
            target.file_name().and_then(|s| s.to_str()).ok_or(StorageError::FileNotFound {
                message: target.display().to_string().into(),
                context: Some("Target must be a file".into()),
            })?;

        let counter = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        Ok(target.with_file_name(format!("{filename}.{counter}.{TMP_SUFFIX}")))
    }

    /// Removes orphaned temp files left behind by earlier crashes.
    ///
    /// Cleanup failures are non-fatal; they are logged and initialization
    /// proceeds.
    pub(crate) async fn purge_tmp(&self) {
        let mut pending = vec![self.inner.root.clone()];
        let mut removed = 0u64;

        while let Some(dir) = pending.pop() {
            let Ok(mut entries) = fs::read_dir(&dir).await else {
                warn!(dir = %dir.display(), "Skipping unreadable directory during temp cleanup");
                continue;
            };

            while let Ok(Some(entry)) = entries.next_entry().await {
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().and_then(|e| e.to_str()) == Some(TMP_SUFFIX) {
                    match fs::remove_file(&path).await {
                        Ok(()) => removed += 1,
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "Failed to remove orphaned temp file");
                        },
                    }
                }
            }
        }

        if removed > 0 {
            debug!(removed, "Purged orphaned temp files");
        }
    }
}
