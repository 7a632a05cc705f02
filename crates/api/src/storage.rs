//! Local file store for uploads and recordings.
//!
//! The store is the adapter side of the dual-write rule: callers write the
//! file and verify it *before* opening any database transaction, and on
//! undo they attempt the delete *before* the row transition commits,
//! treating a missing file as already-satisfied.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Error from a file-store operation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Verification failed for {path}: wrote {expected} bytes, found {actual}")]
    ShortWrite {
        path: String,
        expected: u64,
        actual: u64,
    },
}

/// Flat-file storage rooted at a single directory. All paths handed to the
/// store are relative, produced by `dubline_core::naming`.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of a stored file.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write a file and verify the bytes landed. Any failure here aborts
    /// the surrounding operation before a database transaction opens.
    pub async fn save(&self, relative: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.absolute(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_err(parent, e))?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| io_err(&path, e))?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| io_err(&path, e))?;
        if metadata.len() != bytes.len() as u64 {
            return Err(StorageError::ShortWrite {
                path: path.display().to_string(),
                expected: bytes.len() as u64,
                actual: metadata.len(),
            });
        }

        Ok(())
    }

    /// Read a stored file back.
    pub async fn read(&self, relative: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.absolute(relative);
        tokio::fs::read(&path).await.map_err(|e| io_err(&path, e))
    }

    /// Best-effort delete. A missing file is normal during undo retries;
    /// any other failure is logged and swallowed so the state transition
    /// still commits.
    pub async fn delete_best_effort(&self, relative: &str) {
        let path = self.absolute(relative);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to delete stored file");
            }
        }
    }
}

fn io_err(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("uploads/a/take.wav", b"RIFFdata").await.unwrap();
        assert_eq!(store.read("uploads/a/take.wav").await.unwrap(), b"RIFFdata");
    }

    #[tokio::test]
    async fn save_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store
            .save("uploads/recordings/raw/1_line_7.wav", b"x")
            .await
            .unwrap();
        assert!(store.absolute("uploads/recordings/raw/1_line_7.wav").exists());
    }

    #[tokio::test]
    async fn delete_of_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        // Must not panic or error; missing files are already-satisfied.
        store.delete_best_effort("uploads/nope.wav").await;
    }

    #[tokio::test]
    async fn delete_removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("uploads/x.wav", b"x").await.unwrap();
        store.delete_best_effort("uploads/x.wav").await;
        assert!(!store.absolute("uploads/x.wav").exists());
    }

    #[tokio::test]
    async fn read_of_missing_file_errs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.read("uploads/absent.json").await.is_err());
    }
}
