//! Durable store files
//!
//! Each store persists as one JSON file holding the full array of entities,
//! written with an atomic write (temp file, fsync, rename) so the file is
//! never left half-written. Missing files read as an empty store.
//!
//! Storage location: `~/.local/share/quill/` (configurable via `Config`),
//! one file per store name: `blog.json`, `ebooks.json`, `social.json`.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{StorageError, StorageResult};

/// Persistence handle for one store file
#[derive(Debug, Clone)]
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handle for the given store file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the store file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the full entity array.
    ///
    /// A missing file is an empty store, not an error. A file that exists
    /// but cannot be read or parsed is an error.
    pub fn load<T: DeserializeOwned>(&self) -> StorageResult<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path).map_err(|e| StorageError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        serde_json::from_slice(&bytes).map_err(|e| StorageError::InvalidFormat {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Write the full entity array atomically
    pub fn save<T: Serialize>(&self, entities: &[T]) -> StorageResult<()> {
        let json =
            serde_json::to_vec_pretty(entities).map_err(|e| StorageError::InvalidFormat {
                path: self.path.clone(),
                source: e,
            })?;

        atomic_write(&self.path, &json)
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Size and presence of the store files, for status reporting
#[derive(Debug, Clone, Default)]
pub struct StorageStats {
    pub files: Vec<StoreFile>,
}

/// One store file's stats
#[derive(Debug, Clone)]
pub struct StoreFile {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
    pub size: u64,
}

impl StorageStats {
    /// Gather stats for the given (store name, file path) pairs
    pub fn collect<I>(files: I) -> Self
    where
        I: IntoIterator<Item = (String, PathBuf)>,
    {
        let files = files
            .into_iter()
            .map(|(name, path)| {
                let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                StoreFile {
                    name,
                    exists: path.exists(),
                    path,
                    size,
                }
            })
            .collect();
        Self { files }
    }

    /// Total size of all store files in bytes
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Total size formatted for humans
    pub fn total_size_human(&self) -> String {
        format_size(self.total_size())
    }
}

/// Format a byte count for humans
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
